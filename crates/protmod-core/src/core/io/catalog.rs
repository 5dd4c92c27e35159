//! Reader for XML modification catalogs.
//!
//! A catalog is a `<ProteinModifications>` document holding one `<Entry>`
//! per modification. Entries are streamed one at a time, so a catalog that
//! breaks halfway still yields every entry before the break.

use super::resources::ResourceProvider;
use crate::core::models::category::{ModificationCategory, OccurrenceType, ParseLabelError};
use crate::core::models::condition::{AtomLinkage, Component, ModificationCondition, Terminus};
use crate::core::models::ids::ModificationKey;
use crate::core::models::modification::ModificationField;
use crate::core::utils::identifiers::IdScheme;
use crate::registry::{ModificationStore, RegistryError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashSet;
use std::io::{self, Read};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading catalog '{name}': {source}")]
    Io { name: String, source: io::Error },

    #[error("Malformed catalog XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Catalog has no <ProteinModifications> root element")]
    MissingRoot,

    #[error("Unexpected <{element}> inside <{parent}>")]
    UnexpectedElement {
        element: String,
        parent: &'static str,
    },

    #[error("Catalog ended inside <{0}>")]
    UnexpectedEof(&'static str),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{0}> must not be empty")]
    EmptyElement(&'static str),

    #[error("Entry '{id}' has more than one <{element}>")]
    DuplicateElement { id: String, element: &'static str },

    #[error(transparent)]
    InvalidLabel(#[from] ParseLabelError),

    #[error("Unknown cross-reference source '{0}'")]
    UnknownSource(String),

    #[error("Invalid condition in entry '{id}': {reason}")]
    InvalidCondition { id: String, reason: String },

    #[error("Failed to register entry '{id}': {source}")]
    Registry { id: String, source: RegistryError },
}

/// A reference from a modification to an external vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    pub scheme: IdScheme,
    pub accession: String,
    pub name: Option<String>,
}

/// One parsed `<Entry>` of a catalog, not yet registered.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub category: ModificationCategory,
    pub occurrence_type: OccurrenceType,
    pub description: Option<String>,
    pub systematic_name: Option<String>,
    pub formula: Option<String>,
    pub condition: Option<ModificationCondition>,
    pub cross_references: Vec<CrossReference>,
}

impl CatalogEntry {
    pub fn new(id: &str, category: ModificationCategory, occurrence_type: OccurrenceType) -> Self {
        Self {
            id: id.to_string(),
            category,
            occurrence_type,
            description: None,
            systematic_name: None,
            formula: None,
            condition: None,
            cross_references: Vec::new(),
        }
    }

    /// Registers the entry in `store` through the regular builder path.
    ///
    /// Every precondition is checked before the modification is created, so
    /// an entry that fails leaves `store` untouched.
    pub fn register_into(
        self,
        store: &mut ModificationStore,
    ) -> Result<ModificationKey, RegistryError> {
        self.check_registrable(store)?;

        let mut builder = store.register(self.id, self.category, self.occurrence_type)?;
        if let Some(description) = self.description {
            builder = builder.description(description)?;
        }
        if let Some(systematic_name) = self.systematic_name {
            builder = builder.systematic_name(systematic_name)?;
        }
        if let Some(formula) = self.formula {
            builder = builder.formula(formula)?;
        }
        if let Some(condition) = self.condition {
            builder = builder.condition(condition)?;
        }
        for xref in self.cross_references {
            builder = match xref.scheme {
                IdScheme::Resid => builder.resid_id(xref.accession)?,
                IdScheme::Psimod => builder.psimod_id(xref.accession)?,
                IdScheme::Pdbcc => builder.pdbcc_id(xref.accession)?,
            };
            if let Some(name) = xref.name {
                builder = match xref.scheme {
                    IdScheme::Resid => builder.resid_name(name)?,
                    IdScheme::Psimod => builder.psimod_name(name)?,
                    IdScheme::Pdbcc => builder.pdbcc_name(name)?,
                };
            }
        }
        Ok(builder.key())
    }

    fn check_registrable(&self, store: &ModificationStore) -> Result<(), RegistryError> {
        store.ensure_id_available(&self.id)?;
        let mut seen = HashSet::new();
        for xref in &self.cross_references {
            if !seen.insert(xref.scheme) {
                return Err(RegistryError::FieldAlreadySet {
                    id: self.id.clone(),
                    field: id_field(xref.scheme),
                });
            }
            match xref.scheme {
                IdScheme::Resid => store.ensure_resid_id_available(&xref.accession)?,
                IdScheme::Psimod => store.ensure_psimod_id_available(&xref.accession)?,
                IdScheme::Pdbcc => {}
            }
        }
        Ok(())
    }
}

fn id_field(scheme: IdScheme) -> ModificationField {
    match scheme {
        IdScheme::Resid => ModificationField::ResidId,
        IdScheme::Psimod => ModificationField::PsimodId,
        IdScheme::Pdbcc => ModificationField::PdbccId,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    BeforeRoot,
    InRoot,
    Done,
}

/// Streams [`CatalogEntry`] values out of an XML catalog.
///
/// As an iterator it yields entries until the end of the catalog or the
/// first error, after which it is exhausted.
pub struct CatalogReader<'a> {
    reader: Reader<&'a [u8]>,
    state: ReaderState,
}

impl<'a> CatalogReader<'a> {
    pub fn from_xml(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            state: ReaderState::BeforeRoot,
        }
    }

    /// Reads the next entry, or `None` once the root element is closed.
    pub fn next_entry(&mut self) -> Result<Option<CatalogEntry>, CatalogError> {
        loop {
            if self.state == ReaderState::Done {
                return Ok(None);
            }
            match self.reader.read_event()? {
                Event::Start(e) => match (self.state, e.local_name().as_ref()) {
                    (ReaderState::BeforeRoot, b"ProteinModifications") => {
                        self.state = ReaderState::InRoot;
                    }
                    (ReaderState::InRoot, b"Entry") => {
                        let mut entry = entry_header(&e)?;
                        self.read_entry_body(&mut entry)?;
                        return Ok(Some(entry));
                    }
                    (state, _) => return Err(unexpected(&e, Self::parent_name(state))),
                },
                Event::Empty(e) => match (self.state, e.local_name().as_ref()) {
                    (ReaderState::BeforeRoot, b"ProteinModifications") => {
                        self.state = ReaderState::Done;
                    }
                    (ReaderState::InRoot, b"Entry") => return entry_header(&e).map(Some),
                    (state, _) => return Err(unexpected(&e, Self::parent_name(state))),
                },
                // Mismatched end tags are rejected by the XML reader itself.
                Event::End(_) => self.state = ReaderState::Done,
                Event::Eof => {
                    return Err(match self.state {
                        ReaderState::BeforeRoot => CatalogError::MissingRoot,
                        _ => CatalogError::UnexpectedEof("ProteinModifications"),
                    });
                }
                _ => {}
            }
        }
    }

    fn parent_name(state: ReaderState) -> &'static str {
        match state {
            ReaderState::BeforeRoot => "document",
            _ => "ProteinModifications",
        }
    }

    fn read_entry_body(&mut self, entry: &mut CatalogEntry) -> Result<(), CatalogError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"Description" => {
                        let text = self.read_text("Description")?;
                        set_once(&mut entry.description, text, &entry.id, "Description")?;
                    }
                    b"SystematicName" => {
                        let text = self.read_text("SystematicName")?;
                        set_once(
                            &mut entry.systematic_name,
                            text,
                            &entry.id,
                            "SystematicName",
                        )?;
                    }
                    b"Formula" => {
                        let text = self.read_text("Formula")?;
                        set_once(&mut entry.formula, text, &entry.id, "Formula")?;
                    }
                    b"Condition" => {
                        let condition = self.read_condition(&entry.id)?;
                        if entry.condition.replace(condition).is_some() {
                            return Err(CatalogError::DuplicateElement {
                                id: entry.id.clone(),
                                element: "Condition",
                            });
                        }
                    }
                    b"CrossReference" => {
                        let xref = self.read_cross_reference(&e)?;
                        entry.cross_references.push(xref);
                    }
                    _ => return Err(unexpected(&e, "Entry")),
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"Description" | b"SystematicName" | b"Formula" | b"Condition" => {}
                    _ => return Err(unexpected(&e, "Entry")),
                },
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(CatalogError::UnexpectedEof("Entry")),
                _ => {}
            }
        }
    }

    fn read_cross_reference(
        &mut self,
        start: &BytesStart<'_>,
    ) -> Result<CrossReference, CatalogError> {
        let source = required_attribute(start, "CrossReference", "source")?;
        let scheme = source
            .parse::<IdScheme>()
            .map_err(|_| CatalogError::UnknownSource(source.clone()))?;
        let name = optional_attribute(start, "name")?.filter(|name| !name.is_empty());

        let accession = self.read_text("CrossReference")?;
        if accession.is_empty() {
            return Err(CatalogError::EmptyElement("CrossReference"));
        }
        if !scheme.is_well_formed(&accession) {
            debug!(
                %scheme,
                accession = %accession,
                "Cross-reference accession has an unusual format"
            );
        }

        Ok(CrossReference {
            scheme,
            accession,
            name,
        })
    }

    fn read_condition(&mut self, id: &str) -> Result<ModificationCondition, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidCondition {
            id: id.to_string(),
            reason,
        };

        let mut labels: Vec<String> = Vec::new();
        let mut components = Vec::new();
        let mut bonds = Vec::new();
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"Component" => {
                        let (label, component) = component_from(&e).map_err(&invalid)?;
                        self.read_text("Component")?;
                        labels.push(label);
                        components.push(component);
                    }
                    b"Bond" => bonds.push(self.read_bond()?),
                    _ => return Err(unexpected(&e, "Condition")),
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"Component" => {
                        let (label, component) = component_from(&e).map_err(&invalid)?;
                        labels.push(label);
                        components.push(component);
                    }
                    _ => return Err(unexpected(&e, "Condition")),
                },
                Event::End(_) => break,
                Event::Eof => return Err(CatalogError::UnexpectedEof("Condition")),
                _ => {}
            }
        }

        let position = |label: &str| {
            labels
                .iter()
                .position(|l| l == label)
                .ok_or_else(|| invalid(format!("unknown bond component '{label}'")))
        };
        let mut linkages = Vec::with_capacity(bonds.len());
        for atoms in bonds {
            let [(c1, a1), (c2, a2)]: [(String, String); 2] = atoms
                .try_into()
                .map_err(|_| invalid("a bond needs exactly two atoms".to_string()))?;
            linkages.push(AtomLinkage::new(position(&c1)?, &a1, position(&c2)?, &a2));
        }

        ModificationCondition::new(components, linkages).map_err(|e| invalid(e.to_string()))
    }

    /// Reads the `<Atom component="..">NAME</Atom>` children of a `<Bond>`.
    fn read_bond(&mut self) -> Result<Vec<(String, String)>, CatalogError> {
        let mut atoms = Vec::new();
        loop {
            match self.reader.read_event()? {
                Event::Start(e) if e.local_name().as_ref() == b"Atom" => {
                    let component = required_attribute(&e, "Atom", "component")?;
                    let atom = self.read_text("Atom")?;
                    if atom.is_empty() {
                        return Err(CatalogError::EmptyElement("Atom"));
                    }
                    atoms.push((component, atom));
                }
                Event::Start(e) | Event::Empty(e) => return Err(unexpected(&e, "Bond")),
                Event::End(_) => return Ok(atoms),
                Event::Eof => return Err(CatalogError::UnexpectedEof("Bond")),
                _ => {}
            }
        }
    }

    /// Collects text up to the end of the current element, trimmed.
    fn read_text(&mut self, element: &'static str) -> Result<String, CatalogError> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::End(_) => return Ok(text.trim().to_string()),
                Event::Start(e) | Event::Empty(e) => return Err(unexpected(&e, element)),
                Event::Eof => return Err(CatalogError::UnexpectedEof(element)),
                _ => {}
            }
        }
    }
}

impl Iterator for CatalogReader<'_> {
    type Item = Result<CatalogEntry, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                self.state = ReaderState::Done;
                Some(Err(e))
            }
        }
    }
}

/// Parses `xml` and registers every entry in `store`.
///
/// Entries are registered as they are read. On error, the entries before the
/// failing one stay registered.
///
/// # Return
///
/// The number of entries registered.
pub fn register_catalog(store: &mut ModificationStore, xml: &str) -> Result<usize, CatalogError> {
    let mut registered = 0;
    for entry in CatalogReader::from_xml(xml) {
        let entry = entry?;
        let id = entry.id.clone();
        trace!(id = %id, "Registering catalog entry");
        entry
            .register_into(store)
            .map_err(|source| CatalogError::Registry { id, source })?;
        registered += 1;
    }
    Ok(registered)
}

/// Reads the catalog resource `name` from `resources` and registers its
/// entries in `store`.
pub fn load_catalog(
    store: &mut ModificationStore,
    resources: &dyn ResourceProvider,
    name: &str,
) -> Result<usize, CatalogError> {
    let mut xml = String::new();
    resources
        .open(name)
        .and_then(|mut reader| reader.read_to_string(&mut xml))
        .map_err(|source| CatalogError::Io {
            name: name.to_string(),
            source,
        })?;
    register_catalog(store, &xml)
}

fn entry_header(start: &BytesStart<'_>) -> Result<CatalogEntry, CatalogError> {
    let id = required_attribute(start, "Entry", "id")?;
    if id.is_empty() {
        return Err(CatalogError::MissingAttribute {
            element: "Entry",
            attribute: "id",
        });
    }
    let category: ModificationCategory = required_attribute(start, "Entry", "category")?.parse()?;
    let occurrence_type: OccurrenceType =
        required_attribute(start, "Entry", "occurrence")?.parse()?;
    Ok(CatalogEntry::new(&id, category, occurrence_type))
}

fn component_from(start: &BytesStart<'_>) -> Result<(String, Component), String> {
    let attribute = |name: &'static str| {
        optional_attribute(start, name)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("<Component> lacks attribute '{name}'"))
    };
    let label = attribute("index")?;
    let pdbcc_id = attribute("pdbcc")?;
    let terminus = match optional_attribute(start, "terminus").map_err(|e| e.to_string())? {
        None => None,
        Some(t) if t.eq_ignore_ascii_case("N") => Some(Terminus::N),
        Some(t) if t.eq_ignore_ascii_case("C") => Some(Terminus::C),
        Some(t) => return Err(format!("unknown terminus '{}'", t)),
    };
    let component = match terminus {
        Some(terminus) => Component::at_terminus(&pdbcc_id, terminus),
        None => Component::new(&pdbcc_id),
    };
    Ok((label, component))
}

fn optional_attribute(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, CatalogError> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        if attribute.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attribute.unescape_value()?.trim().to_string()));
        }
    }
    Ok(None)
}

fn required_attribute(
    start: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, CatalogError> {
    optional_attribute(start, attribute)?
        .ok_or(CatalogError::MissingAttribute { element, attribute })
}

fn set_once(
    slot: &mut Option<String>,
    text: String,
    id: &str,
    element: &'static str,
) -> Result<(), CatalogError> {
    if slot.is_some() {
        return Err(CatalogError::DuplicateElement {
            id: id.to_string(),
            element,
        });
    }
    if !text.is_empty() {
        *slot = Some(text);
    }
    Ok(())
}

fn unexpected(start: &BytesStart<'_>, parent: &'static str) -> CatalogError {
    CatalogError::UnexpectedElement {
        element: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        parent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::resources::{DEFAULT_CATALOG, EmbeddedResources};

    const TWO_ENTRIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <ProteinModifications>
          <Entry id="0001" category="attachment" occurrence="natural">
            <Description>O-xylosylated serine</Description>
            <Formula/>
            <Condition>
              <Component index="1" pdbcc="SER"/>
              <Component index="2" pdbcc="XYS"/>
              <Bond>
                <Atom component="1">OG</Atom>
                <Atom component="2">O1</Atom>
              </Bond>
            </Condition>
            <CrossReference source="RESID" name="O-xylosyl-L-serine">AA0406</CrossReference>
            <CrossReference source="PDBCC">XYS</CrossReference>
          </Entry>
          <Entry id="0002" category="modified residue" occurrence="artifact"/>
        </ProteinModifications>"#;

    #[test]
    fn reader_yields_entries_in_document_order() {
        let entries: Vec<_> = CatalogReader::from_xml(TWO_ENTRIES)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.id, "0001");
        assert_eq!(first.category, ModificationCategory::Attachment);
        assert_eq!(first.description.as_deref(), Some("O-xylosylated serine"));
        assert!(first.formula.is_none());
        assert_eq!(
            first.cross_references,
            vec![
                CrossReference {
                    scheme: IdScheme::Resid,
                    accession: "AA0406".to_string(),
                    name: Some("O-xylosyl-L-serine".to_string()),
                },
                CrossReference {
                    scheme: IdScheme::Pdbcc,
                    accession: "XYS".to_string(),
                    name: None,
                },
            ]
        );

        let condition = first.condition.as_ref().unwrap();
        assert_eq!(condition.components().len(), 2);
        assert_eq!(condition.linkages(), &[AtomLinkage::new(0, "OG", 1, "O1")]);

        let second = &entries[1];
        assert_eq!(second.category, ModificationCategory::ChemicalModification);
        assert_eq!(second.occurrence_type, OccurrenceType::Artifact);
        assert!(second.cross_references.is_empty());
    }

    #[test]
    fn register_catalog_feeds_entries_through_builder() {
        let mut store = ModificationStore::new();
        let count = register_catalog(&mut store, TWO_ENTRIES).unwrap();
        assert_eq!(count, 2);

        let xylosyl = store.get_by_resid_id("AA0406").unwrap();
        assert_eq!(xylosyl.id(), "0001");
        assert_eq!(xylosyl.resid_name(), Some("O-xylosyl-L-serine"));
        assert_eq!(xylosyl.pdbcc_id(), Some("XYS"));
        assert!(xylosyl.pdbcc_name().is_none());
        assert!(store.get_by_id("0002").is_some());
    }

    #[test]
    fn entries_before_a_malformed_one_stay_registered() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="attachment" occurrence="natural"/>
              <Entry id="0002" category="glycan" occurrence="natural"/>
              <Entry id="0003" category="attachment" occurrence="natural"/>
            </ProteinModifications>"#;
        let mut store = ModificationStore::new();
        let err = register_catalog(&mut store, xml).unwrap_err();
        match err {
            CatalogError::InvalidLabel(e) => assert_eq!(e.value, "glycan"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.len(), 1);
        assert!(store.get_by_id("0001").is_some());
        assert!(store.get_by_id("0003").is_none());
    }

    #[test]
    fn duplicate_ids_surface_as_registry_errors() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="attachment" occurrence="natural"/>
              <Entry id="0001" category="crosslink" occurrence="natural"/>
            </ProteinModifications>"#;
        let mut store = ModificationStore::new();
        let err = register_catalog(&mut store, xml).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Registry { ref id, source: RegistryError::DuplicateId(_) } if id == "0001"
        ));
    }

    #[test]
    fn entry_with_a_taken_resid_id_is_not_registered() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="attachment" occurrence="natural">
                <CrossReference source="RESID">AA0406</CrossReference>
              </Entry>
              <Entry id="0002" category="attachment" occurrence="natural">
                <Description>collides</Description>
                <CrossReference source="PDBCC">XYS</CrossReference>
                <CrossReference source="RESID">AA0406</CrossReference>
              </Entry>
            </ProteinModifications>"#;
        let mut store = ModificationStore::new();
        let err = register_catalog(&mut store, xml).unwrap_err();
        match err {
            CatalogError::Registry {
                id,
                source: RegistryError::ResidIdTaken { owner, .. },
            } => {
                assert_eq!(id, "0002");
                assert_eq!(owner, "0001");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.len(), 1);
        assert!(store.get_by_id("0002").is_none());
        assert!(store.get_by_pdbcc_id("XYS").is_empty());
        assert!(store.indexes_are_consistent());
    }

    #[test]
    fn entry_repeating_a_scheme_is_rejected_before_registration() {
        let mut entry = CatalogEntry::new(
            "0001",
            ModificationCategory::Attachment,
            OccurrenceType::Natural,
        );
        for accession in ["MOD:00046", "MOD:00047"] {
            entry.cross_references.push(CrossReference {
                scheme: IdScheme::Psimod,
                accession: accession.to_string(),
                name: None,
            });
        }

        let mut store = ModificationStore::new();
        let err = entry.register_into(&mut store).unwrap_err();
        assert_eq!(
            err,
            RegistryError::FieldAlreadySet {
                id: "0001".to_string(),
                field: ModificationField::PsimodId,
            }
        );
        assert!(store.is_empty());
        assert!(store.get_by_psimod_id("MOD:00046").is_none());
    }

    #[test]
    fn content_without_root_element_is_rejected() {
        let mut store = ModificationStore::new();
        let err = register_catalog(&mut store, "this is not a catalog").unwrap_err();
        assert!(matches!(err, CatalogError::MissingRoot));
        assert!(store.is_empty());
    }

    #[test]
    fn mismatched_tags_are_reported_as_xml_errors() {
        let xml = r#"<ProteinModifications><Entry id="1" category="attachment" occurrence="natural"></Entr></ProteinModifications>"#;
        let err = CatalogReader::from_xml(xml).next().unwrap().unwrap_err();
        assert!(matches!(err, CatalogError::Xml(_)));
    }

    #[test]
    fn truncated_catalog_reports_unexpected_eof() {
        let xml = r#"<ProteinModifications><Entry id="1" category="attachment" occurrence="natural">"#;
        let result: Result<Vec<_>, _> = CatalogReader::from_xml(xml).collect();
        assert!(matches!(
            result,
            Err(CatalogError::UnexpectedEof(_)) | Err(CatalogError::Xml(_))
        ));
    }

    #[test]
    fn reader_stops_after_first_error() {
        let xml = r#"<ProteinModifications>
              <Unknown/>
              <Entry id="0001" category="attachment" occurrence="natural"/>
            </ProteinModifications>"#;
        let mut reader = CatalogReader::from_xml(xml);
        assert!(matches!(
            reader.next(),
            Some(Err(CatalogError::UnexpectedElement { ref element, .. })) if element == "Unknown"
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn missing_entry_attribute_is_reported() {
        let xml = r#"<ProteinModifications><Entry id="0001" category="attachment"/></ProteinModifications>"#;
        let err = CatalogReader::from_xml(xml).next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingAttribute {
                element: "Entry",
                attribute: "occurrence"
            }
        ));
    }

    #[test]
    fn unknown_cross_reference_source_is_rejected() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="attachment" occurrence="natural">
                <CrossReference source="UniProt">P12345</CrossReference>
              </Entry>
            </ProteinModifications>"#;
        let err = CatalogReader::from_xml(xml).next().unwrap().unwrap_err();
        match err {
            CatalogError::UnknownSource(source) => assert_eq!(source, "UniProt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bond_to_undeclared_component_is_an_invalid_condition() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="crosslink" occurrence="natural">
                <Condition>
                  <Component index="1" pdbcc="CYS"/>
                  <Bond><Atom component="1">SG</Atom><Atom component="2">SG</Atom></Bond>
                </Condition>
              </Entry>
            </ProteinModifications>"#;
        let err = CatalogReader::from_xml(xml).next().unwrap().unwrap_err();
        match err {
            CatalogError::InvalidCondition { id, .. } => assert_eq!(id, "0001"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn terminus_attribute_is_parsed() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="chemical-modification" occurrence="natural">
                <Condition><Component index="1" pdbcc="PCA" terminus="n"/></Condition>
              </Entry>
            </ProteinModifications>"#;
        let entry = CatalogReader::from_xml(xml).next().unwrap().unwrap();
        let condition = entry.condition.unwrap();
        assert_eq!(condition.components()[0].terminus, Some(Terminus::N));
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let xml = r#"<ProteinModifications>
              <Entry id="0001" category="attachment" occurrence="natural">
                <Description>sugar &amp; serine</Description>
              </Entry>
            </ProteinModifications>"#;
        let entry = CatalogReader::from_xml(xml).next().unwrap().unwrap();
        assert_eq!(entry.description.as_deref(), Some("sugar & serine"));
    }

    #[test]
    fn empty_root_yields_no_entries() {
        let mut store = ModificationStore::new();
        let count = register_catalog(&mut store, "<ProteinModifications/>").unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn bundled_catalog_loads_completely() {
        let mut store = ModificationStore::new();
        let count = load_catalog(&mut store, &EmbeddedResources, DEFAULT_CATALOG).unwrap();
        assert_eq!(count, store.len());
        assert!(count >= 16);

        let phosphoserine = store.get_by_resid_id("AA0037").unwrap();
        assert_eq!(phosphoserine.psimod_id(), Some("MOD:00046"));
        assert_eq!(phosphoserine.pdbcc_id(), Some("SEP"));
        assert_eq!(
            store.get_by_psimod_id("MOD:00046").unwrap().id(),
            phosphoserine.id()
        );

        let nag: Vec<_> = store.get_by_pdbcc_id("NAG").iter().map(|m| m.id()).collect();
        assert_eq!(nag, vec!["0002", "0003"]);

        let cystine = store.get_by_resid_id("AA0025").unwrap();
        assert_eq!(cystine.category(), ModificationCategory::Crosslink);
        assert!(store.indexes_are_consistent());
    }

    #[test]
    fn load_catalog_reports_missing_resource_as_io_error() {
        let mut store = ModificationStore::new();
        let err = load_catalog(&mut store, &EmbeddedResources, "absent.xml").unwrap_err();
        match err {
            CatalogError::Io { name, .. } => assert_eq!(name, "absent.xml"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
