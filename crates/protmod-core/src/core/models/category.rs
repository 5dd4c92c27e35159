use phf::{Map, phf_map};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Broad structural classification of a protein modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModificationCategory {
    /// A chemical group attached to a single residue (e.g., glycosylation).
    Attachment,
    /// A chemical change of the residue itself (e.g., hydroxylation).
    ChemicalModification,
    /// A covalent link between two or more residues (e.g., a disulfide bond).
    Crosslink,
    /// Not classified.
    Unknown,
}

/// How a modification arises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccurrenceType {
    /// Observed in vivo.
    Natural,
    /// Predicted but not observed.
    Hypothetical,
    /// Introduced by sample handling or experimental procedure.
    Artifact,
}

static CATEGORY_LABELS: Map<&'static str, ModificationCategory> = phf_map! {
    "attachment" => ModificationCategory::Attachment,
    "chemical-modification" => ModificationCategory::ChemicalModification,
    "chemical modification" => ModificationCategory::ChemicalModification,
    "modified-residue" => ModificationCategory::ChemicalModification,
    "modified residue" => ModificationCategory::ChemicalModification,
    "crosslink" => ModificationCategory::Crosslink,
    "cross-link" => ModificationCategory::Crosslink,
    "unknown" => ModificationCategory::Unknown,
};

static OCCURRENCE_LABELS: Map<&'static str, OccurrenceType> = phf_map! {
    "natural" => OccurrenceType::Natural,
    "hypothetical" => OccurrenceType::Hypothetical,
    "artifact" => OccurrenceType::Artifact,
    "artefact" => OccurrenceType::Artifact,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognized {kind} label '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ModificationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ModificationCategory::Attachment => "attachment",
            ModificationCategory::ChemicalModification => "chemical-modification",
            ModificationCategory::Crosslink => "crosslink",
            ModificationCategory::Unknown => "unknown",
        }
    }
}

impl OccurrenceType {
    pub fn label(&self) -> &'static str {
        match self {
            OccurrenceType::Natural => "natural",
            OccurrenceType::Hypothetical => "hypothetical",
            OccurrenceType::Artifact => "artifact",
        }
    }
}

impl FromStr for ModificationCategory {
    type Err = ParseLabelError;

    /// Parses a category label. Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORY_LABELS
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ParseLabelError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl FromStr for OccurrenceType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OCCURRENCE_LABELS
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ParseLabelError {
                kind: "occurrence type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ModificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for OccurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
