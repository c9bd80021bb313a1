//! TOML record bundles: the branches of a network together with the legacy record sets to
//! import onto them. Bundles are a fixture format for exercising the importer from the command
//! line, not one of the legacy file formats.

use crate::error::{CliError, Result};
use hydrostruct::core::models::branch::{Branch, BranchCrossSection, BranchKind};
use hydrostruct::core::models::network::Network;
use hydrostruct::core::models::records::ImportRecords;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchRecordKind {
    #[default]
    Channel,
    SewerConnection,
    InternalConnection,
}

impl From<BranchRecordKind> for BranchKind {
    fn from(kind: BranchRecordKind) -> Self {
        match kind {
            BranchRecordKind::Channel => BranchKind::Channel,
            BranchRecordKind::SewerConnection => BranchKind::SewerConnection { internal: false },
            BranchRecordKind::InternalConnection => BranchKind::SewerConnection { internal: true },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchRecord {
    pub name: String,
    pub length: f64,
    #[serde(default)]
    pub kind: BranchRecordKind,
    #[serde(default)]
    pub cross_sections: Vec<BranchCrossSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkBundle {
    #[serde(default)]
    pub branches: Vec<BranchRecord>,
    #[serde(flatten)]
    pub records: ImportRecords,
}

impl NetworkBundle {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading record bundle from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// A network holding the bundle's branches and nothing else.
    pub fn to_network(&self) -> Network {
        let mut network = Network::new();
        for record in &self.branches {
            let mut branch = Branch::new(&record.name, record.length, record.kind.into());
            branch.cross_sections.clone_from(&record.cross_sections);
            network.add_branch(branch);
        }
        network
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hydrostruct::core::models::records::DefinitionKind;

    pub(crate) const SAMPLE: &str = r#"
        [[branches]]
        name = "B1"
        length = 100.0
        cross_sections = [{ chainage = 50.0, width = 20.0, left_offset = 0.0 }]

        [[branches]]
        name = "S1"
        length = 12.0
        kind = "internal-connection"

        [[locations]]
        id = "W1"
        branch_id = "B1"
        chainage = 40.0
        name = "Weir one"

        [[locations]]
        id = "P1"
        branch_id = "B1"
        chainage = 140.0
        name = "Pump station"

        [[locations]]
        id = "X1"
        branch_id = "B7"
        chainage = 5.0

        [[definitions]]
        id = "D1"
        type = "weir"
        crest_level = 1.5
        crest_width = 4.0

        [[definitions]]
        id = "D2"
        type = "pump"
        control_direction = 1
        capacity_table = [
            { capacity = 2.0, suction_start = 1.0, suction_stop = 0.5, delivery_start = 3.0, delivery_stop = 3.5 },
            { capacity = 5.0, suction_start = 1.2, suction_stop = 0.7, delivery_start = 3.0, delivery_stop = 3.5 },
        ]

        [[mappings]]
        structure_id = "W1"
        definition_id = "D1"

        [[mappings]]
        structure_id = "P1"
        definition_id = "D2"

        [[mappings]]
        structure_id = "X1"
        definition_id = "D1"
    "#;

    #[test]
    fn bundle_parses_branches_and_records() {
        let bundle: NetworkBundle = toml::from_str(SAMPLE).unwrap();

        assert_eq!(bundle.branches.len(), 2);
        assert_eq!(bundle.branches[1].kind, BranchRecordKind::InternalConnection);
        assert_eq!(bundle.records.locations.len(), 3);
        assert!(matches!(
            bundle.records.definitions[1].kind,
            DefinitionKind::Pump(ref data) if data.capacity_table.len() == 2
        ));
        assert_eq!(bundle.records.mappings.len(), 3);
    }

    #[test]
    fn network_contains_the_bundle_branches() {
        let bundle: NetworkBundle = toml::from_str(SAMPLE).unwrap();

        let network = bundle.to_network();

        let b1 = network.branch(network.find_branch("B1").unwrap()).unwrap();
        assert!(b1.is_channel());
        assert_eq!(b1.cross_sections.len(), 1);
        let s1 = network.branch(network.find_branch("S1").unwrap()).unwrap();
        assert!(s1.is_internal_connection());
        assert_eq!(network.structure_count(), 0);
    }

    #[test]
    fn unreadable_bundle_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, "[[branches]]\nname = 3\n").unwrap();

        assert!(matches!(
            NetworkBundle::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
