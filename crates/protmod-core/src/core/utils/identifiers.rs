use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// External vocabularies a modification can be cross-referenced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdScheme {
    Resid,
    Psimod,
    Pdbcc,
}

static SCHEME_ALIASES: Map<&'static str, IdScheme> = phf_map! {
    "RESID" => IdScheme::Resid,
    "PSI-MOD" => IdScheme::Psimod,
    "PSIMOD" => IdScheme::Psimod,
    "PSI_MOD" => IdScheme::Psimod,
    "MOD" => IdScheme::Psimod,
    "PDBCC" => IdScheme::Pdbcc,
    "PDB-CC" => IdScheme::Pdbcc,
    "PDBCCD" => IdScheme::Pdbcc,
    "CCD" => IdScheme::Pdbcc,
};

impl IdScheme {
    pub fn label(&self) -> &'static str {
        match self {
            IdScheme::Resid => "RESID",
            IdScheme::Psimod => "PSI-MOD",
            IdScheme::Pdbcc => "PDBCC",
        }
    }

    /// Whether `accession` has the shape this vocabulary uses.
    pub fn is_well_formed(&self, accession: &str) -> bool {
        match self {
            IdScheme::Resid => is_resid_accession(accession),
            IdScheme::Psimod => is_psimod_accession(accession),
            IdScheme::Pdbcc => is_pdbcc_code(accession),
        }
    }
}

impl FromStr for IdScheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCHEME_ALIASES
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// RESID accessions are `AA` followed by four digits (e.g., `AA0406`).
pub fn is_resid_accession(accession: &str) -> bool {
    accession
        .strip_prefix("AA")
        .is_some_and(|digits| is_digits(digits, 4))
}

/// PSI-MOD accessions are `MOD:` followed by five digits (e.g., `MOD:00046`).
pub fn is_psimod_accession(accession: &str) -> bool {
    accession
        .strip_prefix("MOD:")
        .is_some_and(|digits| is_digits(digits, 5))
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Chemical component codes are one to five upper-case alphanumerics.
pub fn is_pdbcc_code(code: &str) -> bool {
    (1..=5).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_parses_common_spellings_case_insensitively() {
        assert_eq!("RESID".parse(), Ok(IdScheme::Resid));
        assert_eq!("psi-mod".parse(), Ok(IdScheme::Psimod));
        assert_eq!(" PsiMod ".parse(), Ok(IdScheme::Psimod));
        assert_eq!("ccd".parse(), Ok(IdScheme::Pdbcc));
        assert_eq!("UniProt".parse::<IdScheme>(), Err(()));
    }

    #[test]
    fn resid_accession_requires_prefix_and_four_digits() {
        assert!(is_resid_accession("AA0406"));
        assert!(!is_resid_accession("AA406"));
        assert!(!is_resid_accession("aa0406"));
        assert!(!is_resid_accession("AB0406"));
    }

    #[test]
    fn psimod_accession_requires_prefix_and_five_digits() {
        assert!(is_psimod_accession("MOD:00046"));
        assert!(!is_psimod_accession("MOD:0046"));
        assert!(!is_psimod_accession("00046"));
    }

    #[test]
    fn pdbcc_code_is_short_upper_case_alphanumeric() {
        assert!(is_pdbcc_code("SEP"));
        assert!(is_pdbcc_code("M3L"));
        assert!(!is_pdbcc_code("sep"));
        assert!(!is_pdbcc_code(""));
        assert!(!is_pdbcc_code("TOOLONG"));
    }

    #[test]
    fn is_well_formed_dispatches_on_scheme() {
        assert!(IdScheme::Resid.is_well_formed("AA0037"));
        assert!(!IdScheme::Psimod.is_well_formed("AA0037"));
        assert!(IdScheme::Pdbcc.is_well_formed("XYS"));
    }
}
