use super::error::RegistryError;
use super::store::ModificationStore;
use crate::core::models::condition::ModificationCondition;
use crate::core::models::ids::ModificationKey;
use crate::core::models::modification::{ModificationField, ProteinModification};

/// Sets the optional attributes of a freshly registered modification.
///
/// A builder is bound to exactly one definition and holds the store mutably
/// while it lives. Every setter consumes the builder and hands it back on
/// success, so calls chain with `?`:
///
/// ```
/// use protmod::core::models::category::{ModificationCategory, OccurrenceType};
/// use protmod::registry::ModificationStore;
///
/// let mut store = ModificationStore::new();
/// store
///     .register("0001", ModificationCategory::Attachment, OccurrenceType::Natural)?
///     .resid_id("AA0406")?
///     .resid_name("O-xylosyl-L-serine")?;
///
/// assert_eq!(store.get_by_resid_id("AA0406").unwrap().id(), "0001");
/// # Ok::<(), protmod::registry::RegistryError>(())
/// ```
///
/// Each attribute can be set once. Setting it again fails with
/// [`RegistryError::FieldAlreadySet`] and leaves the definition unchanged.
#[derive(Debug)]
pub struct ModificationBuilder<'a> {
    store: &'a mut ModificationStore,
    key: ModificationKey,
}

impl<'a> ModificationBuilder<'a> {
    pub(crate) fn new(store: &'a mut ModificationStore, key: ModificationKey) -> Self {
        Self { store, key }
    }

    /// The store key of the modification under construction.
    pub fn key(&self) -> ModificationKey {
        self.key
    }

    /// Ends the building phase and returns the modification.
    pub fn as_modification(self) -> &'a ProteinModification {
        let store: &'a ModificationStore = self.store;
        store.modification(self.key)
    }

    /// Sets the Protein Data Bank Chemical Component ID and files the
    /// modification under it. Several modifications may share one ID.
    pub fn pdbcc_id(self, pdbcc_id: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::PdbccId, pdbcc_id.into())
    }

    pub fn pdbcc_name(self, pdbcc_name: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::PdbccName, pdbcc_name.into())
    }

    /// Sets the RESID ID.
    ///
    /// # Errors
    ///
    /// Fails if the RESID ID of this modification has been set, or if the
    /// RESID ID is already registered by another modification.
    pub fn resid_id(self, resid_id: impl Into<String>) -> Result<Self, RegistryError> {
        let resid_id = resid_id.into();
        self.ensure_unset(ModificationField::ResidId)?;
        self.store.ensure_resid_id_available(&resid_id)?;
        self.set_text(ModificationField::ResidId, resid_id)
    }

    pub fn resid_name(self, resid_name: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::ResidName, resid_name.into())
    }

    /// Sets the PSI-MOD ID.
    ///
    /// # Errors
    ///
    /// Fails if the PSI-MOD ID of this modification has been set, or if the
    /// PSI-MOD ID is already registered by another modification.
    pub fn psimod_id(self, psimod_id: impl Into<String>) -> Result<Self, RegistryError> {
        let psimod_id = psimod_id.into();
        self.ensure_unset(ModificationField::PsimodId)?;
        self.store.ensure_psimod_id_available(&psimod_id)?;
        self.set_text(ModificationField::PsimodId, psimod_id)
    }

    pub fn psimod_name(self, psimod_name: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::PsimodName, psimod_name.into())
    }

    pub fn systematic_name(self, name: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::SystematicName, name.into())
    }

    pub fn description(self, description: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::Description, description.into())
    }

    /// Sets the formula of the modified residue.
    pub fn formula(self, formula: impl Into<String>) -> Result<Self, RegistryError> {
        self.set_text(ModificationField::Formula, formula.into())
    }

    pub fn condition(self, condition: ModificationCondition) -> Result<Self, RegistryError> {
        self.ensure_unset(ModificationField::Condition)?;
        self.store
            .modification_mut(self.key)
            .set_condition(condition);
        Ok(self)
    }

    fn ensure_unset(&self, field: ModificationField) -> Result<(), RegistryError> {
        let current = self.store.modification(self.key);
        if current.is_set(field) {
            return Err(RegistryError::FieldAlreadySet {
                id: current.id().to_string(),
                field,
            });
        }
        Ok(())
    }

    fn set_text(self, field: ModificationField, value: String) -> Result<Self, RegistryError> {
        self.ensure_unset(field)?;

        // Bind the field first, then let the index read it back.
        if let Some(slot) = self.store.modification_mut(self.key).text_slot_mut(field) {
            *slot = Some(value);
        }
        self.store.index_field(self.key, field);

        Ok(self)
    }
}
