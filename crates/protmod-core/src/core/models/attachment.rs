use super::modification::ProteinModification;

/// One occurrence of a modification on a structure: a chemical group
/// covalently attached to an amino acid residue.
///
/// The residue, group and atom types belong to whatever structural model
/// the caller uses; implementors only expose references they already hold.
pub trait Attachment {
    type Residue;
    type Group;
    type Atom;

    /// The modification that occurred on the residue.
    fn modification(&self) -> &ProteinModification;

    /// The amino acid the group is attached to.
    fn modified_residue(&self) -> &Self::Residue;

    fn attached_group(&self) -> &Self::Group;

    /// The attachment point on the amino acid.
    fn atom_on_residue(&self) -> &Self::Atom;

    /// The attachment point on the attached group.
    fn atom_on_attached_group(&self) -> &Self::Atom;
}

/// An [`Attachment`] assembled from borrowed references.
#[derive(Debug, Clone, Copy)]
pub struct ModifiedSite<'a, R, G, A> {
    pub modification: &'a ProteinModification,
    pub residue: &'a R,
    pub group: &'a G,
    pub residue_atom: &'a A,
    pub group_atom: &'a A,
}

impl<R, G, A> Attachment for ModifiedSite<'_, R, G, A> {
    type Residue = R;
    type Group = G;
    type Atom = A;

    fn modification(&self) -> &ProteinModification {
        self.modification
    }

    fn modified_residue(&self) -> &R {
        self.residue
    }

    fn attached_group(&self) -> &G {
        self.group
    }

    fn atom_on_residue(&self) -> &A {
        self.residue_atom
    }

    fn atom_on_attached_group(&self) -> &A {
        self.group_atom
    }
}
