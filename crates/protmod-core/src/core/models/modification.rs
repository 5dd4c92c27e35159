use super::category::{ModificationCategory, OccurrenceType};
use super::condition::ModificationCondition;
use serde::Serialize;
use std::fmt;

/// Optional attributes of a [`ProteinModification`], each of which may be
/// assigned at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModificationField {
    PdbccId,
    PdbccName,
    ResidId,
    ResidName,
    PsimodId,
    PsimodName,
    SystematicName,
    Description,
    Formula,
    Condition,
}

impl ModificationField {
    pub fn name(&self) -> &'static str {
        match self {
            ModificationField::PdbccId => "PDBCC ID",
            ModificationField::PdbccName => "PDBCC name",
            ModificationField::ResidId => "RESID ID",
            ModificationField::ResidName => "RESID name",
            ModificationField::PsimodId => "PSI-MOD ID",
            ModificationField::PsimodName => "PSI-MOD name",
            ModificationField::SystematicName => "Systematic name",
            ModificationField::Description => "Description",
            ModificationField::Formula => "Formula",
            ModificationField::Condition => "Condition",
        }
    }
}

impl fmt::Display for ModificationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A protein modification definition.
///
/// Instances cannot be constructed directly; they are created through
/// [`ModificationStore::register`](crate::registry::ModificationStore::register)
/// and completed with the returned builder. The identifier, category and
/// occurrence type are fixed at registration; every other attribute starts
/// unset and can be assigned once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProteinModification {
    id: String,
    category: ModificationCategory,
    occurrence_type: OccurrenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdbcc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdbcc_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resid_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resid_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    psimod_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    psimod_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    systematic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<ModificationCondition>,
}

impl ProteinModification {
    pub(crate) fn new(
        id: String,
        category: ModificationCategory,
        occurrence_type: OccurrenceType,
    ) -> Self {
        Self {
            id,
            category,
            occurrence_type,
            pdbcc_id: None,
            pdbcc_name: None,
            resid_id: None,
            resid_name: None,
            psimod_id: None,
            psimod_name: None,
            systematic_name: None,
            description: None,
            formula: None,
            condition: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> ModificationCategory {
        self.category
    }

    pub fn occurrence_type(&self) -> OccurrenceType {
        self.occurrence_type
    }

    /// Protein Data Bank Chemical Component ID.
    pub fn pdbcc_id(&self) -> Option<&str> {
        self.pdbcc_id.as_deref()
    }

    /// Protein Data Bank Chemical Component name.
    pub fn pdbcc_name(&self) -> Option<&str> {
        self.pdbcc_name.as_deref()
    }

    pub fn resid_id(&self) -> Option<&str> {
        self.resid_id.as_deref()
    }

    pub fn resid_name(&self) -> Option<&str> {
        self.resid_name.as_deref()
    }

    pub fn psimod_id(&self) -> Option<&str> {
        self.psimod_id.as_deref()
    }

    pub fn psimod_name(&self) -> Option<&str> {
        self.psimod_name.as_deref()
    }

    pub fn systematic_name(&self) -> Option<&str> {
        self.systematic_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Formula of the modified residue.
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    pub fn condition(&self) -> Option<&ModificationCondition> {
        self.condition.as_ref()
    }

    /// Returns the value of a text field, or `None` if it is unset or the
    /// field is not textual ([`ModificationField::Condition`]).
    pub fn text(&self, field: ModificationField) -> Option<&str> {
        match field {
            ModificationField::PdbccId => self.pdbcc_id(),
            ModificationField::PdbccName => self.pdbcc_name(),
            ModificationField::ResidId => self.resid_id(),
            ModificationField::ResidName => self.resid_name(),
            ModificationField::PsimodId => self.psimod_id(),
            ModificationField::PsimodName => self.psimod_name(),
            ModificationField::SystematicName => self.systematic_name(),
            ModificationField::Description => self.description(),
            ModificationField::Formula => self.formula(),
            ModificationField::Condition => None,
        }
    }

    pub fn is_set(&self, field: ModificationField) -> bool {
        match field {
            ModificationField::Condition => self.condition.is_some(),
            _ => self.text(field).is_some(),
        }
    }

    pub(crate) fn text_slot_mut(
        &mut self,
        field: ModificationField,
    ) -> Option<&mut Option<String>> {
        match field {
            ModificationField::PdbccId => Some(&mut self.pdbcc_id),
            ModificationField::PdbccName => Some(&mut self.pdbcc_name),
            ModificationField::ResidId => Some(&mut self.resid_id),
            ModificationField::ResidName => Some(&mut self.resid_name),
            ModificationField::PsimodId => Some(&mut self.psimod_id),
            ModificationField::PsimodName => Some(&mut self.psimod_name),
            ModificationField::SystematicName => Some(&mut self.systematic_name),
            ModificationField::Description => Some(&mut self.description),
            ModificationField::Formula => Some(&mut self.formula),
            ModificationField::Condition => None,
        }
    }

    pub(crate) fn set_condition(&mut self, condition: ModificationCondition) {
        self.condition = Some(condition);
    }

    /// Whether `query` (already lowercased) occurs in the id or any of the
    /// descriptive names.
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        std::iter::once(self.id.as_str())
            .chain(
                [
                    ModificationField::ResidId,
                    ModificationField::ResidName,
                    ModificationField::PsimodId,
                    ModificationField::PsimodName,
                    ModificationField::PdbccId,
                    ModificationField::PdbccName,
                    ModificationField::SystematicName,
                    ModificationField::Description,
                ]
                .into_iter()
                .filter_map(|field| self.text(field)),
            )
            .any(|text| text.to_lowercase().contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phosphoserine() -> ProteinModification {
        let mut modification = ProteinModification::new(
            "0002".to_string(),
            ModificationCategory::ChemicalModification,
            OccurrenceType::Natural,
        );
        for (field, value) in [
            (ModificationField::ResidId, "AA0037"),
            (ModificationField::ResidName, "O-phospho-L-serine"),
        ] {
            *modification.text_slot_mut(field).unwrap() = Some(value.to_string());
        }
        modification
    }

    #[test]
    fn new_modification_has_required_fields_and_nothing_else() {
        let modification = ProteinModification::new(
            "0001".to_string(),
            ModificationCategory::Attachment,
            OccurrenceType::Natural,
        );
        assert_eq!(modification.id(), "0001");
        assert_eq!(modification.category(), ModificationCategory::Attachment);
        assert_eq!(modification.occurrence_type(), OccurrenceType::Natural);
        for field in [
            ModificationField::PdbccId,
            ModificationField::PdbccName,
            ModificationField::ResidId,
            ModificationField::ResidName,
            ModificationField::PsimodId,
            ModificationField::PsimodName,
            ModificationField::SystematicName,
            ModificationField::Description,
            ModificationField::Formula,
            ModificationField::Condition,
        ] {
            assert!(!modification.is_set(field), "{field} should start unset");
        }
    }

    #[test]
    fn text_reads_back_assigned_slots() {
        let modification = phosphoserine();
        assert_eq!(
            modification.text(ModificationField::ResidId),
            Some("AA0037")
        );
        assert_eq!(modification.resid_name(), Some("O-phospho-L-serine"));
        assert!(modification.text(ModificationField::Condition).is_none());
    }

    #[test]
    fn condition_has_no_text_slot() {
        let mut modification = phosphoserine();
        let slot = modification.text_slot_mut(ModificationField::Condition);
        assert!(slot.is_none());
    }

    #[test]
    fn matches_lowercase_searches_names_and_id() {
        let modification = phosphoserine();
        assert!(modification.matches_lowercase("phospho"));
        assert!(modification.matches_lowercase("aa0037"));
        assert!(modification.matches_lowercase("0002"));
        assert!(!modification.matches_lowercase("acetyl"));
    }

    #[test]
    fn field_display_uses_human_readable_name() {
        assert_eq!(ModificationField::PsimodId.to_string(), "PSI-MOD ID");
        assert_eq!(
            ModificationField::SystematicName.to_string(),
            "Systematic name"
        );
    }
}
