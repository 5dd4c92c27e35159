use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use protmod::core::io::export;
use protmod::core::models::modification::{ModificationField, ProteinModification};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

const DETAIL_FIELDS: [ModificationField; 9] = [
    ModificationField::ResidId,
    ModificationField::ResidName,
    ModificationField::PsimodId,
    ModificationField::PsimodName,
    ModificationField::PdbccId,
    ModificationField::PdbccName,
    ModificationField::SystematicName,
    ModificationField::Description,
    ModificationField::Formula,
];

/// One line per modification: ID, category, occurrence, cross-references and
/// description.
pub fn summary_line(m: &ProteinModification) -> String {
    let mut line = format!(
        "{:<8} {:<22} {:<12}",
        m.id(),
        m.category(),
        m.occurrence_type()
    );
    let refs: Vec<String> = [
        ("RESID", m.resid_id()),
        ("PSI-MOD", m.psimod_id()),
        ("PDBCC", m.pdbcc_id()),
    ]
    .into_iter()
    .filter_map(|(label, id)| id.map(|id| format!("{}={}", label, id)))
    .collect();
    line.push(' ');
    line.push_str(&refs.join(" "));
    if let Some(description) = m.description() {
        line.push_str("  ");
        line.push_str(description);
    }
    line.trim_end().to_string()
}

/// Every set attribute of `m`, one per line, followed by its condition.
pub fn detail_block(m: &ProteinModification) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "{:<16} {}", "ID", m.id());
    let _ = writeln!(block, "{:<16} {}", "Category", m.category());
    let _ = writeln!(block, "{:<16} {}", "Occurrence", m.occurrence_type());
    for field in DETAIL_FIELDS {
        if let Some(value) = m.text(field) {
            let _ = writeln!(block, "{:<16} {}", field.name(), value);
        }
    }
    if let Some(condition) = m.condition() {
        let components: Vec<String> = condition
            .components()
            .iter()
            .map(|c| match c.terminus {
                Some(terminus) => format!("{} ({:?}-terminal)", c.pdbcc_id, terminus),
                None => c.pdbcc_id.clone(),
            })
            .collect();
        let _ = writeln!(block, "{:<16} {}", "Components", components.join(", "));
        for linkage in condition.linkages() {
            let Some([(c1, a1), (c2, a2)]) = condition.linkage_ends(linkage) else {
                continue;
            };
            let _ = writeln!(
                block,
                "{:<16} {}:{} - {}:{}",
                "Linkage", c1.pdbcc_id, a1, c2.pdbcc_id, a2
            );
        }
    }
    block
}

#[derive(Serialize)]
struct TomlDocument<'a> {
    modification: &'a [&'a ProteinModification],
}

pub fn to_toml(modifications: &[&ProteinModification]) -> Result<String> {
    let document = TomlDocument {
        modification: modifications,
    };
    toml::to_string(&document).map_err(|e| CliError::Other(e.into()))
}

/// Writes `modifications` to `out` in `format`. List-style text output uses
/// one summary line each; `detailed` switches to full attribute blocks.
pub fn emit(
    out: &mut dyn Write,
    modifications: &[&ProteinModification],
    format: OutputFormat,
    detailed: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text if detailed => {
            let blocks: Vec<String> = modifications.iter().map(|m| detail_block(m)).collect();
            write!(out, "{}", blocks.join("\n"))?;
        }
        OutputFormat::Text => {
            for m in modifications {
                writeln!(out, "{}", summary_line(m))?;
            }
        }
        OutputFormat::Toml => write!(out, "{}", to_toml(modifications)?)?,
        OutputFormat::Csv => {
            export::write_csv(modifications.iter().copied(), out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use protmod::registry::ModificationRegistry;

    fn with_xylosyl<T>(f: impl FnOnce(&ProteinModification) -> T) -> T {
        let registry = ModificationRegistry::new();
        f(registry.get_by_id("0001").unwrap())
    }

    #[test]
    fn summary_line_lists_cross_references_and_description() {
        let line = with_xylosyl(summary_line);
        assert!(line.starts_with("0001"));
        assert!(line.contains("attachment"));
        assert!(line.contains("RESID=AA0406"));
        assert!(line.contains("PDBCC=XYS"));
        assert!(!line.contains("PSI-MOD="));
        assert!(line.ends_with("O-xylosylated serine"));
    }

    #[test]
    fn detail_block_shows_set_fields_and_linkages() {
        let block = with_xylosyl(detail_block);
        assert!(block.contains("RESID name"));
        assert!(block.contains("O-xylosyl-L-serine"));
        assert!(!block.contains("PSI-MOD ID"));
        assert!(block.contains("SER:OG - XYS:O1"));
    }

    #[test]
    fn toml_output_parses_back_as_a_table_array() {
        let registry = ModificationRegistry::new();
        let mods = registry.get_by_pdbcc_id("NAG");
        let text = to_toml(&mods).unwrap();

        let value: toml::Value = toml::from_str(&text).unwrap();
        let entries = value["modification"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"].as_str(), Some("0002"));
        assert_eq!(entries[0]["pdbcc_id"].as_str(), Some("NAG"));
    }

    #[test]
    fn csv_output_has_a_header_row() {
        let registry = ModificationRegistry::new();
        let mods = vec![registry.get_by_id("0004").unwrap()];
        let mut out = Vec::new();
        emit(&mut out, &mods, OutputFormat::Csv, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("id,category,occurrence"));
    }
}
