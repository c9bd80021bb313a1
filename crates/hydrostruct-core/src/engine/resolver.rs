use super::report::ImportReporter;
use crate::core::models::records::{
    CompoundGroup, FrictionRecord, ImportRecords, StructureDefinition, StructureLocation,
    StructureMapping,
};
use std::collections::HashMap;

/// A mapping together with the definition it points at.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMember<'a> {
    pub mapping: &'a StructureMapping,
    pub definition: &'a StructureDefinition,
}

/// A location whose every reference was found.
#[derive(Debug, Clone)]
pub enum ResolvedLocation<'a> {
    Single(ResolvedMember<'a>),
    Compound {
        group: &'a CompoundGroup,
        members: Vec<ResolvedMember<'a>>,
    },
}

impl<'a> ResolvedLocation<'a> {
    /// Members in build order.
    pub fn members(&self) -> &[ResolvedMember<'a>] {
        match self {
            Self::Single(member) => std::slice::from_ref(member),
            Self::Compound { members, .. } => members,
        }
    }
}

/// Read-only indexes over the record sets of one pass.
#[derive(Debug)]
pub struct LocationResolver<'a> {
    locations: &'a [StructureLocation],
    mappings: HashMap<&'a str, &'a StructureMapping>,
    definitions: HashMap<&'a str, &'a StructureDefinition>,
    compounds: HashMap<&'a str, &'a CompoundGroup>,
    frictions: &'a [FrictionRecord],
}

impl<'a> LocationResolver<'a> {
    /// Indexes the records. Duplicate mapping ids are reported; for every duplicated id the
    /// last record wins, for mappings, definitions and compound groups alike.
    pub fn new(records: &'a ImportRecords, reporter: &ImportReporter<'_>) -> Self {
        let mut mappings = HashMap::with_capacity(records.mappings.len());
        for mapping in &records.mappings {
            if mappings.insert(mapping.structure_id.as_str(), mapping).is_some() {
                reporter.warn(format!(
                    "Duplicate structure definition statements for id = {}, overwriting definition with latest values : DefId = \"{}\", Description = \"{}\", Controller Ids = \"{}\"",
                    mapping.structure_id,
                    mapping.definition_id,
                    mapping.name,
                    mapping.controller_ids.join(", ")
                ));
            }
        }

        let definitions = records
            .definitions
            .iter()
            .map(|d| (d.id.as_str(), d))
            .collect();
        let compounds = records
            .compounds
            .iter()
            .map(|c| (c.id.as_str(), c))
            .collect();

        Self {
            locations: &records.locations,
            mappings,
            definitions,
            compounds,
            frictions: &records.frictions,
        }
    }

    pub fn mapping(&self, structure_id: &str) -> Option<&'a StructureMapping> {
        self.mappings.get(structure_id).copied()
    }

    pub fn definition(&self, definition_id: &str) -> Option<&'a StructureDefinition> {
        self.definitions.get(definition_id).copied()
    }

    pub fn compound(&self, id: &str) -> Option<&'a CompoundGroup> {
        self.compounds.get(id).copied()
    }

    /// Resolves every reference of a location, or reports the first gap and returns `None`.
    pub fn resolve(
        &self,
        location: &StructureLocation,
        reporter: &ImportReporter<'_>,
    ) -> Option<ResolvedLocation<'a>> {
        if location.is_compound {
            let Some(group) = self.compound(&location.id) else {
                report_missing_mapping(&location.id, reporter);
                return None;
            };
            let members = group
                .members
                .iter()
                .map(|member| self.resolve_member(member, &location.id, reporter))
                .collect::<Option<Vec<_>>>()?;
            Some(ResolvedLocation::Compound { group, members })
        } else {
            let Some(mapping) = self.mapping(&location.id) else {
                report_missing_mapping(&location.id, reporter);
                return None;
            };
            let definition = self.definition_of(mapping, &location.id, reporter)?;
            Some(ResolvedLocation::Single(ResolvedMember {
                mapping,
                definition,
            }))
        }
    }

    /// Display name of a compound member: the name of the first non-compound location with the
    /// member's id.
    pub fn sibling_name(&self, member_id: &str) -> Option<&'a str> {
        self.locations
            .iter()
            .find(|l| l.id == member_id && !l.is_compound)
            .map(|l| l.name.as_str())
    }

    /// The first friction record of a definition.
    pub fn friction_for(&self, definition_id: &str) -> Option<&'a FrictionRecord> {
        self.frictions
            .iter()
            .find(|f| f.definition_id == definition_id)
    }

    fn resolve_member(
        &self,
        member_id: &str,
        location_id: &str,
        reporter: &ImportReporter<'_>,
    ) -> Option<ResolvedMember<'a>> {
        let Some(mapping) = self.mapping(member_id) else {
            reporter.warn(format!(
                "No definition with id = {member_id} for structure {location_id}."
            ));
            return None;
        };
        let definition = self.definition_of(mapping, location_id, reporter)?;
        Some(ResolvedMember {
            mapping,
            definition,
        })
    }

    fn definition_of(
        &self,
        mapping: &StructureMapping,
        location_id: &str,
        reporter: &ImportReporter<'_>,
    ) -> Option<&'a StructureDefinition> {
        let definition = self.definition(&mapping.definition_id);
        if definition.is_none() {
            reporter.warn(format!(
                "No definition with id = {} for structure {}.",
                mapping.definition_id, location_id
            ));
        }
        definition
    }
}

fn report_missing_mapping(id: &str, reporter: &ImportReporter<'_>) {
    reporter.warn(format!("No mapping of structure found with id = {id}."));
}
