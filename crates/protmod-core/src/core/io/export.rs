use crate::core::models::modification::ProteinModification;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    id: &'a str,
    category: &'static str,
    occurrence: &'static str,
    resid_id: Option<&'a str>,
    resid_name: Option<&'a str>,
    psimod_id: Option<&'a str>,
    psimod_name: Option<&'a str>,
    pdbcc_id: Option<&'a str>,
    pdbcc_name: Option<&'a str>,
    formula: Option<&'a str>,
}

impl<'a> From<&'a ProteinModification> for ExportRecord<'a> {
    fn from(m: &'a ProteinModification) -> Self {
        Self {
            id: m.id(),
            category: m.category().label(),
            occurrence: m.occurrence_type().label(),
            resid_id: m.resid_id(),
            resid_name: m.resid_name(),
            psimod_id: m.psimod_id(),
            psimod_name: m.psimod_name(),
            pdbcc_id: m.pdbcc_id(),
            pdbcc_name: m.pdbcc_name(),
            formula: m.formula(),
        }
    }
}

/// Writes `modifications` as CSV, one header row then one row each.
/// Unset attributes become empty cells.
pub fn write_csv<'a, W, I>(modifications: I, writer: W) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ProteinModification>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for modification in modifications {
        csv_writer.serialize(ExportRecord::from(modification))?;
        rows += 1;
    }
    if rows == 0 {
        // serde-driven headers are only emitted with the first record.
        csv_writer.write_record(HEADER)?;
    }
    csv_writer.flush()?;
    Ok(rows)
}

const HEADER: [&str; 10] = [
    "id",
    "category",
    "occurrence",
    "resid_id",
    "resid_name",
    "psimod_id",
    "psimod_name",
    "pdbcc_id",
    "pdbcc_name",
    "formula",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::category::{ModificationCategory, OccurrenceType};
    use crate::registry::ModificationStore;

    fn sample_store() -> ModificationStore {
        let mut store = ModificationStore::new();
        store
            .register(
                "0004",
                ModificationCategory::ChemicalModification,
                OccurrenceType::Natural,
            )
            .unwrap()
            .resid_id("AA0037")
            .unwrap()
            .psimod_id("MOD:00046")
            .unwrap()
            .pdbcc_id("SEP")
            .unwrap()
            .formula("C 3 H 6 N 1 O 5 P 1")
            .unwrap();
        store
            .register(
                "0013",
                ModificationCategory::Crosslink,
                OccurrenceType::Natural,
            )
            .unwrap()
            .resid_name("L-cystine, with comma")
            .unwrap();
        store
    }

    #[test]
    fn csv_has_header_and_one_row_per_definition() {
        let store = sample_store();
        let mut buffer = Vec::new();
        let selected = [
            store.get_by_id("0004").unwrap(),
            store.get_by_id("0013").unwrap(),
        ];
        let rows = write_csv(selected, &mut buffer).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(
            lines[1],
            "0004,chemical-modification,natural,AA0037,,MOD:00046,,SEP,,C 3 H 6 N 1 O 5 P 1"
        );
        assert_eq!(
            lines[2],
            "0013,crosslink,natural,,\"L-cystine, with comma\",,,,,"
        );
    }

    #[test]
    fn empty_input_still_writes_header() {
        let mut buffer = Vec::new();
        assert_eq!(write_csv(std::iter::empty(), &mut buffer).unwrap(), 0);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim_end(), HEADER.join(","));
    }

    #[test]
    fn csv_round_trips_through_reader() {
        let store = sample_store();
        let mut buffer = Vec::new();
        write_csv(store.modifications(), &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let mut ids: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["0004", "0013"]);
    }
}
