use super::builder::ModificationBuilder;
use super::error::RegistryError;
use crate::core::models::category::{ModificationCategory, OccurrenceType};
use crate::core::models::ids::ModificationKey;
use crate::core::models::modification::{ModificationField, ProteinModification};
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Storage for registered modification definitions and their lookup indexes.
///
/// Definitions live in a slot map and are never removed, so a
/// [`ModificationKey`] handed out by [`register`](Self::register) stays valid
/// for the lifetime of the store. Each secondary index mirrors one field of
/// the stored definitions and is only updated through
/// [`index_field`](Self::index_field) after that field has been bound.
#[derive(Debug, Clone, Default)]
pub struct ModificationStore {
    /// Primary storage for all registered definitions.
    modifications: SlotMap<ModificationKey, ProteinModification>,
    /// Modification ID to definition, one-to-one.
    by_id: HashMap<String, ModificationKey>,
    /// RESID ID to definition, one-to-one.
    by_resid_id: HashMap<String, ModificationKey>,
    /// PSI-MOD ID to definition, one-to-one.
    by_psimod_id: HashMap<String, ModificationKey>,
    /// PDBCC ID to every definition sharing that chemical component.
    by_pdbcc_id: HashMap<String, HashSet<ModificationKey>>,
}

impl ModificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new modification and returns a builder for its optional
    /// attributes.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique modification identifier.
    /// * `category` - The modification category.
    /// * `occurrence_type` - How the modification arises.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyId`] if `id` is empty, or
    /// [`RegistryError::DuplicateId`] if a modification with the same ID has
    /// already been registered. The store is unchanged in both cases.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        category: ModificationCategory,
        occurrence_type: OccurrenceType,
    ) -> Result<ModificationBuilder<'_>, RegistryError> {
        let id = id.into();
        self.ensure_id_available(&id)?;

        trace!(id = %id, %category, %occurrence_type, "Registering protein modification");
        let modification = ProteinModification::new(id.clone(), category, occurrence_type);
        let key = self.modifications.insert(modification);
        self.by_id.insert(id, key);

        Ok(ModificationBuilder::new(self, key))
    }

    pub fn get(&self, key: ModificationKey) -> Option<&ProteinModification> {
        self.modifications.get(key)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ProteinModification> {
        self.by_id.get(id).and_then(|&key| self.get(key))
    }

    pub fn get_by_resid_id(&self, resid_id: &str) -> Option<&ProteinModification> {
        self.by_resid_id
            .get(resid_id)
            .and_then(|&key| self.get(key))
    }

    pub fn get_by_psimod_id(&self, psimod_id: &str) -> Option<&ProteinModification> {
        self.by_psimod_id
            .get(psimod_id)
            .and_then(|&key| self.get(key))
    }

    /// Returns every modification sharing the given chemical component,
    /// ordered by modification ID. Unknown IDs yield an empty list.
    pub fn get_by_pdbcc_id(&self, pdbcc_id: &str) -> Vec<&ProteinModification> {
        let mut found: Vec<_> = self
            .by_pdbcc_id
            .get(pdbcc_id)
            .into_iter()
            .flatten()
            .filter_map(|&key| self.get(key))
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        found
    }

    /// Returns an iterator over all registered modifications.
    pub fn modifications(&self) -> impl Iterator<Item = &ProteinModification> {
        self.modifications.values()
    }

    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    pub fn pdbcc_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.by_pdbcc_id.keys().map(String::as_str)
    }

    pub fn resid_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.by_resid_id.keys().map(String::as_str)
    }

    pub fn psimod_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.by_psimod_id.keys().map(String::as_str)
    }

    /// Finds modifications whose ID, cross-reference IDs, names or
    /// description contain `query`, ignoring case. Results are ordered by ID.
    pub fn search(&self, query: &str) -> Vec<&ProteinModification> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut found: Vec<_> = self
            .modifications
            .values()
            .filter(|m| m.matches_lowercase(&query))
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        found
    }

    pub(crate) fn modification(&self, key: ModificationKey) -> &ProteinModification {
        &self.modifications[key]
    }

    pub(crate) fn modification_mut(&mut self, key: ModificationKey) -> &mut ProteinModification {
        &mut self.modifications[key]
    }

    pub(crate) fn ensure_id_available(&self, id: &str) -> Result<(), RegistryError> {
        if id.is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if self.by_id.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    pub(crate) fn ensure_resid_id_available(&self, resid_id: &str) -> Result<(), RegistryError> {
        match self.get_by_resid_id(resid_id) {
            Some(owner) => Err(RegistryError::ResidIdTaken {
                resid_id: resid_id.to_string(),
                owner: owner.id().to_string(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn ensure_psimod_id_available(&self, psimod_id: &str) -> Result<(), RegistryError> {
        match self.get_by_psimod_id(psimod_id) {
            Some(owner) => Err(RegistryError::PsimodIdTaken {
                psimod_id: psimod_id.to_string(),
                owner: owner.id().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Reflects the current value of `field` on the definition at `key` into
    /// the matching secondary index. Fields without an index are ignored.
    pub(crate) fn index_field(&mut self, key: ModificationKey, field: ModificationField) {
        let Some(modification) = self.modifications.get(key) else {
            return;
        };
        let Some(value) = modification.text(field) else {
            return;
        };
        match field {
            ModificationField::PdbccId => {
                self.by_pdbcc_id
                    .entry(value.to_string())
                    .or_default()
                    .insert(key);
            }
            ModificationField::ResidId => {
                self.by_resid_id.insert(value.to_string(), key);
            }
            ModificationField::PsimodId => {
                self.by_psimod_id.insert(value.to_string(), key);
            }
            _ => {}
        }
    }

    /// Checks that every index entry points at a definition whose field
    /// holds the indexed value, and that every set field is indexed.
    #[cfg(test)]
    pub(crate) fn indexes_are_consistent(&self) -> bool {
        let one_to_one = |index: &HashMap<String, ModificationKey>, field: ModificationField| {
            index.iter().all(|(value, &key)| {
                self.get(key).and_then(|m| m.text(field)) == Some(value.as_str())
            }) && self.modifications.iter().all(|(key, m)| {
                m.text(field)
                    .is_none_or(|value| index.get(value) == Some(&key))
            })
        };
        let pdbcc_ok = self.by_pdbcc_id.iter().all(|(value, keys)| {
            keys.iter().all(|&key| {
                self.get(key).and_then(|m| m.pdbcc_id()) == Some(value.as_str())
            })
        }) && self.modifications.iter().all(|(key, m)| {
            m.pdbcc_id().is_none_or(|value| {
                self.by_pdbcc_id
                    .get(value)
                    .is_some_and(|keys| keys.contains(&key))
            })
        });
        let ids_ok = self.by_id.len() == self.modifications.len()
            && self
                .modifications
                .iter()
                .all(|(key, m)| self.by_id.get(m.id()) == Some(&key));

        ids_ok
            && pdbcc_ok
            && one_to_one(&self.by_resid_id, ModificationField::ResidId)
            && one_to_one(&self.by_psimod_id, ModificationField::PsimodId)
    }
}
