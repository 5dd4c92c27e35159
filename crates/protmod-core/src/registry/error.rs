use crate::core::models::modification::ModificationField;
use thiserror::Error;

/// Precondition violations raised while registering or building a
/// modification definition. The definition under construction is left as it
/// was before the failing call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Modification ID must not be empty")]
    EmptyId,

    #[error("Modification '{0}' has already been registered")]
    DuplicateId(String),

    #[error("{field} of modification '{id}' has already been set")]
    FieldAlreadySet {
        id: String,
        field: ModificationField,
    },

    #[error("RESID ID '{resid_id}' has already been registered by modification '{owner}'")]
    ResidIdTaken { resid_id: String, owner: String },

    #[error("PSI-MOD ID '{psimod_id}' has already been registered by modification '{owner}'")]
    PsimodIdTaken { psimod_id: String, owner: String },
}
