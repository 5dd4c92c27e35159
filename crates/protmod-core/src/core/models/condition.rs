use serde::Serialize;
use thiserror::Error;

/// Which end of the polypeptide chain a component must sit on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terminus {
    N,
    C,
}

/// A chemical component taking part in a modification, identified by its
/// PDB Chemical Component Dictionary code (e.g., "SER", "XYS").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Component {
    pub pdbcc_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminus: Option<Terminus>,
}

impl Component {
    pub fn new(pdbcc_id: &str) -> Self {
        Self {
            pdbcc_id: pdbcc_id.to_string(),
            terminus: None,
        }
    }

    pub fn at_terminus(pdbcc_id: &str, terminus: Terminus) -> Self {
        Self {
            pdbcc_id: pdbcc_id.to_string(),
            terminus: Some(terminus),
        }
    }
}

/// A bond between an atom of one component and an atom of another.
///
/// Components are referenced by their position in the owning
/// [`ModificationCondition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AtomLinkage {
    pub components: [usize; 2],
    pub atoms: [String; 2],
}

impl AtomLinkage {
    pub fn new(component1: usize, atom1: &str, component2: usize, atom2: &str) -> Self {
        Self {
            components: [component1, component2],
            atoms: [atom1.to_string(), atom2.to_string()],
        }
    }
}

/// The structural condition under which a modification applies: the
/// components involved and the atoms through which they are linked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModificationCondition {
    components: Vec<Component>,
    linkages: Vec<AtomLinkage>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("A modification condition requires at least one component")]
    NoComponents,
    #[error("Linkage references component {index}, but only {count} component(s) are defined")]
    ComponentOutOfRange { index: usize, count: usize },
    #[error("Linkage connects component {0} to itself")]
    SelfLinkage(usize),
}

impl ModificationCondition {
    /// Creates a condition after checking that every linkage references two
    /// distinct, existing components.
    pub fn new(
        components: Vec<Component>,
        linkages: Vec<AtomLinkage>,
    ) -> Result<Self, ConditionError> {
        if components.is_empty() {
            return Err(ConditionError::NoComponents);
        }
        for linkage in &linkages {
            for &index in &linkage.components {
                if index >= components.len() {
                    return Err(ConditionError::ComponentOutOfRange {
                        index,
                        count: components.len(),
                    });
                }
            }
            if linkage.components[0] == linkage.components[1] {
                return Err(ConditionError::SelfLinkage(linkage.components[0]));
            }
        }
        Ok(Self {
            components,
            linkages,
        })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn linkages(&self) -> &[AtomLinkage] {
        &self.linkages
    }

    /// Resolves a linkage into `(component, atom)` pairs for both ends.
    ///
    /// Returns `None` if the linkage names a component this condition does
    /// not have, which can only happen for a linkage taken from elsewhere.
    pub fn linkage_ends<'a>(
        &'a self,
        linkage: &'a AtomLinkage,
    ) -> Option<[(&'a Component, &'a str); 2]> {
        let first = self.components.get(linkage.components[0])?;
        let second = self.components.get(linkage.components[1])?;
        Some([
            (first, linkage.atoms[0].as_str()),
            (second, linkage.atoms[1].as_str()),
        ])
    }
}
