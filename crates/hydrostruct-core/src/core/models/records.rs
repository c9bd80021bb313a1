//! Flat legacy records consumed by an import pass.
//!
//! These values are produced by the legacy file readers, are immutable for the duration of a
//! pass and are discarded afterwards. They derive `Deserialize` so that record bundles can be
//! fed to the importer from fixtures.

use crate::core::hydraulics::cross_section::CrossSectionShape;
use crate::core::hydraulics::friction::FrictionFunction;
use serde::Deserialize;

/// Branch id used by locations that are not on a branch because they are part of a compound.
pub const COMPOUND_MEMBER_BRANCH_ID: &str = "-1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructureLocation {
    pub id: String,
    pub branch_id: String,
    pub chainage: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_compound: bool,
}

impl StructureLocation {
    pub fn new(id: &str, branch_id: &str, chainage: f64, name: &str) -> Self {
        Self {
            id: id.to_string(),
            branch_id: branch_id.to_string(),
            chainage,
            name: name.to_string(),
            is_compound: false,
        }
    }

    pub fn compound(id: &str, branch_id: &str, chainage: f64, name: &str) -> Self {
        Self {
            is_compound: true,
            ..Self::new(id, branch_id, chainage, name)
        }
    }

    /// Whether the location only exists as a member of a compound and is not placed on a branch.
    pub fn is_compound_member(&self) -> bool {
        self.branch_id.trim() == COMPOUND_MEMBER_BRANCH_ID
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructureMapping {
    pub structure_id: String,
    pub definition_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub controller_ids: Vec<String>,
}

impl StructureMapping {
    pub fn new(structure_id: &str, definition_id: &str, name: &str) -> Self {
        Self {
            structure_id: structure_id.to_string(),
            definition_id: definition_id.to_string(),
            name: name.to_string(),
            controller_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompoundGroup {
    pub id: String,
    pub members: Vec<String>,
}

impl CompoundGroup {
    pub fn new(id: &str, members: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrictionRecord {
    pub definition_id: String,
    #[serde(default)]
    pub main_function: FrictionFunction,
    pub main_type: i32,
    pub main_value: f64,
    pub ground_layer_type: i32,
    #[serde(default)]
    pub ground_layer_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ValveRow {
    pub opening: f64,
    pub loss_coefficient: f64,
}

/// Gate-opening versus loss-coefficient table used by gated culverts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValveTable {
    pub id: String,
    pub rows: Vec<ValveRow>,
}

// --- Structure definitions ---

/// Values for the five sections of a general structure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SectionValues {
    pub upstream: f64,
    pub left: f64,
    pub centre: f64,
    pub right: f64,
    pub downstream: f64,
}

/// Free/drowned gate and weir flow coefficients for one flow direction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FlowCoefficients {
    pub free_gate: f64,
    pub drowned_gate: f64,
    pub free_weir: f64,
    pub drowned_weir: f64,
    pub contraction: f64,
}

impl Default for FlowCoefficients {
    fn default() -> Self {
        Self {
            free_gate: 1.0,
            drowned_gate: 1.0,
            free_weir: 1.0,
            drowned_weir: 1.0,
            contraction: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiverWeirData {
    pub crest_level: f64,
    pub crest_width: f64,
    #[serde(default)]
    pub flow_direction: i32,
    #[serde(default)]
    pub crest_shape: i32,
    pub correction_coefficient_positive: f64,
    pub correction_coefficient_negative: f64,
    pub submerge_limit_positive: f64,
    pub submerge_limit_negative: f64,
    #[serde(default)]
    pub reduction_positive: Vec<(f64, f64)>,
    #[serde(default)]
    pub reduction_negative: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PierCoefficients {
    pub upstream_face: f64,
    pub design_head: f64,
    pub pier_contraction: f64,
    pub abutment_contraction: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiverAdvancedWeirData {
    pub crest_level: f64,
    pub crest_width: f64,
    #[serde(default)]
    pub flow_direction: i32,
    #[serde(default)]
    pub number_of_piers: u32,
    #[serde(default)]
    pub positive: PierCoefficients,
    #[serde(default)]
    pub negative: PierCoefficients,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneralStructureData {
    pub widths: SectionValues,
    pub bed_levels: SectionValues,
    pub gate_height: f64,
    #[serde(default)]
    pub positive: FlowCoefficients,
    #[serde(default)]
    pub negative: FlowCoefficients,
    #[serde(default)]
    pub extra_resistance: Option<f64>,
    /// The older record format stores the gate opening itself in `gate_height`.
    #[serde(default)]
    pub from_legacy_format: bool,
    #[serde(default)]
    pub flow_direction: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimpleWeirData {
    pub crest_level: f64,
    pub crest_width: f64,
    #[serde(default = "unit_coefficient")]
    pub discharge_coefficient: f64,
    #[serde(default = "unit_coefficient")]
    pub lateral_contraction: f64,
    #[serde(default)]
    pub flow_direction: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrificeData {
    pub crest_level: f64,
    pub crest_width: f64,
    pub gate_height: f64,
    #[serde(default = "unit_coefficient")]
    pub contraction_coefficient: f64,
    #[serde(default = "unit_coefficient")]
    pub lateral_contraction: f64,
    #[serde(default)]
    pub max_positive_flow: Option<f64>,
    #[serde(default)]
    pub max_negative_flow: Option<f64>,
    #[serde(default)]
    pub flow_direction: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UniversalWeirData {
    pub cross_section_id: String,
    pub crest_level_shift: f64,
    #[serde(default = "unit_coefficient")]
    pub discharge_coefficient: f64,
    #[serde(default)]
    pub flow_direction: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PumpCapacityRow {
    pub capacity: f64,
    pub suction_start: f64,
    pub suction_stop: f64,
    pub delivery_start: f64,
    pub delivery_stop: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PumpData {
    /// Signed legacy control code: the magnitude selects the controlled side, the sign the
    /// pumping direction.
    pub control_direction: i32,
    #[serde(default)]
    pub capacity_table: Vec<PumpCapacityRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BridgeKind {
    Pillar,
    Abutment,
    FixedBed,
    SoilBed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BridgeData {
    pub bridge_type: BridgeKind,
    #[serde(default)]
    pub cross_section_id: String,
    pub bed_level: f64,
    pub length: f64,
    #[serde(default)]
    pub inlet_loss_coefficient: f64,
    #[serde(default)]
    pub outlet_loss_coefficient: f64,
    #[serde(default)]
    pub flow_direction: i32,
    #[serde(default)]
    pub pillar_width: f64,
    #[serde(default)]
    pub shape_factor: f64,
    #[serde(default)]
    pub ground_layer_thickness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CulvertVariant {
    #[default]
    Culvert,
    Siphon,
    InvertedSiphon,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CulvertData {
    #[serde(default)]
    pub variant: CulvertVariant,
    pub inlet_level: f64,
    pub outlet_level: f64,
    pub length: f64,
    #[serde(default)]
    pub inlet_loss_coefficient: f64,
    #[serde(default)]
    pub outlet_loss_coefficient: f64,
    #[serde(default)]
    pub bend_loss_coefficient: f64,
    pub cross_section_id: String,
    #[serde(default)]
    pub flow_direction: i32,
    /// Marks a gated culvert whose losses come from a valve table.
    #[serde(default)]
    pub use_loss_table: bool,
    #[serde(default)]
    pub valve_table_id: String,
    #[serde(default)]
    pub initial_gate_opening: f64,
    #[serde(default)]
    pub ground_layer_thickness: Option<f64>,
}

/// Type-specific payload of a structure definition, tagged by legacy structure family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DefinitionKind {
    RiverWeir(RiverWeirData),
    RiverAdvancedWeir(RiverAdvancedWeirData),
    GeneralStructure(GeneralStructureData),
    RiverPump(PumpData),
    DatabaseStructure,
    Weir(SimpleWeirData),
    Orifice(OrificeData),
    Pump(PumpData),
    Culvert(CulvertData),
    UniversalWeir(UniversalWeirData),
    Bridge(BridgeData),
    Other { type_code: i32 },
}

impl DefinitionKind {
    /// The legacy numeric structure type code.
    pub fn type_code(&self) -> i32 {
        match self {
            Self::RiverWeir(_) => 0,
            Self::RiverAdvancedWeir(_) => 1,
            Self::GeneralStructure(_) => 2,
            Self::RiverPump(_) => 3,
            Self::DatabaseStructure => 4,
            Self::Weir(_) => 6,
            Self::Orifice(_) => 7,
            Self::Pump(_) => 9,
            Self::Culvert(_) => 10,
            Self::UniversalWeir(_) => 11,
            Self::Bridge(_) => 12,
            Self::Other { type_code } => *type_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructureDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: DefinitionKind,
}

impl StructureDefinition {
    pub fn new(id: &str, name: &str, kind: DefinitionKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

/// Every record set an import pass reads, as supplied by the legacy readers.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ImportRecords {
    pub locations: Vec<StructureLocation>,
    pub definitions: Vec<StructureDefinition>,
    pub mappings: Vec<StructureMapping>,
    pub compounds: Vec<CompoundGroup>,
    pub cross_sections: Vec<CrossSectionShape>,
    pub frictions: Vec<FrictionRecord>,
    pub valve_tables: Vec<ValveTable>,
}

fn unit_coefficient() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_member_sentinel_is_detected_with_surrounding_whitespace() {
        let member = StructureLocation::new("S1", " -1 ", 0.0, "");
        let placed = StructureLocation::new("S2", "B1", 10.0, "");
        assert!(member.is_compound_member());
        assert!(!placed.is_compound_member());
    }

    #[test]
    fn compound_constructor_sets_flag() {
        let location = StructureLocation::compound("C1", "B1", 5.0, "Compound");
        assert!(location.is_compound);
        assert_eq!(location.name, "Compound");
    }

    #[test]
    fn type_codes_follow_legacy_numbering() {
        let pump = DefinitionKind::Pump(PumpData {
            control_direction: 1,
            capacity_table: vec![],
        });
        assert_eq!(pump.type_code(), 9);
        assert_eq!(DefinitionKind::DatabaseStructure.type_code(), 4);
        assert_eq!(DefinitionKind::Other { type_code: 13 }.type_code(), 13);
    }

    #[test]
    fn definitions_deserialize_from_tagged_tables() {
        let toml_str = r#"
            id = "D1"
            name = "weir"
            type = "weir"
            crest_level = 1.5
            crest_width = 4.0
            flow_direction = 1
        "#;

        let definition: StructureDefinition = toml::from_str(toml_str).unwrap();

        assert_eq!(definition.id, "D1");
        match definition.kind {
            DefinitionKind::Weir(data) => {
                assert_eq!(data.crest_level, 1.5);
                assert_eq!(data.discharge_coefficient, 1.0);
                assert_eq!(data.flow_direction, 1);
            }
            other => panic!("unexpected definition kind {other:?}"),
        }
    }
}
