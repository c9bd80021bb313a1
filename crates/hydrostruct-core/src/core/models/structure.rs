use super::formula::WeirFormula;
use crate::core::hydraulics::cross_section::TabulatedRow;
use crate::core::hydraulics::flow_direction::FlowDirection;
use crate::core::hydraulics::friction::FrictionType;
use crate::core::models::records::ValveRow;
use std::fmt;

/// Runtime family of a structure; together with the name it identifies a structure for merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureFamily {
    Weir,
    Orifice,
    Pump,
    Bridge,
    Culvert,
}

impl fmt::Display for StructureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weir => "weir",
            Self::Orifice => "orifice",
            Self::Pump => "pump",
            Self::Bridge => "bridge",
            Self::Culvert => "culvert",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundLayer {
    pub enabled: bool,
    pub thickness: f64,
    pub roughness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureFriction {
    pub friction_type: FrictionType,
    pub value: f64,
    pub ground_layer: GroundLayer,
}

impl StructureFriction {
    pub fn new(friction_type: FrictionType, value: f64) -> Self {
        Self {
            friction_type,
            value,
            ground_layer: GroundLayer::default(),
        }
    }
}

impl Default for StructureFriction {
    fn default() -> Self {
        Self::new(FrictionType::Chezy, 45.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Weir {
    pub name: String,
    pub long_name: String,
    pub flow_direction: FlowDirection,
    pub crest_level: f64,
    pub crest_width: f64,
    pub offset_y: f64,
    pub formula: WeirFormula,
}

impl Weir {
    pub fn update_from(&mut self, other: &Weir) {
        self.name.clone_from(&other.name);
        self.long_name.clone_from(&other.long_name);
        self.flow_direction = other.flow_direction;
        self.crest_level = other.crest_level;
        self.crest_width = other.crest_width;
        self.offset_y = other.offset_y;
        self.formula.clone_from(&other.formula);
    }
}

/// A weir whose formula describes a controllable gate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Orifice {
    pub name: String,
    pub long_name: String,
    pub flow_direction: FlowDirection,
    pub crest_level: f64,
    pub crest_width: f64,
    pub offset_y: f64,
    pub formula: WeirFormula,
}

impl Orifice {
    pub fn update_from(&mut self, other: &Orifice) {
        self.name.clone_from(&other.name);
        self.long_name.clone_from(&other.long_name);
        self.flow_direction = other.flow_direction;
        self.crest_level = other.crest_level;
        self.crest_width = other.crest_width;
        self.offset_y = other.offset_y;
        self.formula.clone_from(&other.formula);
    }
}

impl From<Weir> for Orifice {
    fn from(weir: Weir) -> Self {
        Self {
            name: weir.name,
            long_name: weir.long_name,
            flow_direction: weir.flow_direction,
            crest_level: weir.crest_level,
            crest_width: weir.crest_width,
            offset_y: weir.offset_y,
            formula: weir.formula,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PumpControlDirection {
    SuctionSide,
    DeliverySide,
    #[default]
    SuctionAndDeliverySide,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pump {
    pub name: String,
    pub long_name: String,
    pub capacity: f64,
    pub suction_start: f64,
    pub suction_stop: f64,
    pub delivery_start: f64,
    pub delivery_stop: f64,
    pub control_direction: PumpControlDirection,
    pub direction_is_positive: bool,
}

impl Pump {
    pub fn update_from(&mut self, other: &Pump) {
        self.name.clone_from(&other.name);
        self.long_name.clone_from(&other.long_name);
        self.capacity = other.capacity;
        self.suction_start = other.suction_start;
        self.suction_stop = other.suction_stop;
        self.delivery_start = other.delivery_start;
        self.delivery_stop = other.delivery_stop;
        self.control_direction = other.control_direction;
        self.direction_is_positive = other.direction_is_positive;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BridgeType {
    #[default]
    Rectangle,
    Tabulated,
    Pillar,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bridge {
    pub name: String,
    pub long_name: String,
    pub flow_direction: FlowDirection,
    pub bridge_type: BridgeType,
    pub shift: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub inlet_loss_coefficient: f64,
    pub outlet_loss_coefficient: f64,
    pub pillar_width: f64,
    pub shape_factor: f64,
    pub tabulated_profile: Vec<TabulatedRow>,
    pub friction: StructureFriction,
}

impl Bridge {
    pub fn update_from(&mut self, other: &Bridge) {
        self.name.clone_from(&other.name);
        self.long_name.clone_from(&other.long_name);
        self.flow_direction = other.flow_direction;
        self.bridge_type = other.bridge_type;
        self.shift = other.shift;
        self.length = other.length;
        self.width = other.width;
        self.height = other.height;
        self.inlet_loss_coefficient = other.inlet_loss_coefficient;
        self.outlet_loss_coefficient = other.outlet_loss_coefficient;
        self.pillar_width = other.pillar_width;
        self.shape_factor = other.shape_factor;
        self.tabulated_profile.clone_from(&other.tabulated_profile);
        self.friction = other.friction;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CulvertType {
    #[default]
    Culvert,
    InvertedSiphon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CulvertGeometryType {
    Tabulated,
    Rectangle,
    Round,
    Egg,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CulvertGeometry {
    Tabulated { rows: Vec<TabulatedRow> },
    Rectangle { width: f64, height: f64 },
    Round { diameter: f64 },
    Egg { width: f64, height: f64 },
}

impl CulvertGeometry {
    pub fn geometry_type(&self) -> CulvertGeometryType {
        match self {
            Self::Tabulated { .. } => CulvertGeometryType::Tabulated,
            Self::Rectangle { .. } => CulvertGeometryType::Rectangle,
            Self::Round { .. } => CulvertGeometryType::Round,
            Self::Egg { .. } => CulvertGeometryType::Egg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Culvert {
    pub name: String,
    pub long_name: String,
    pub flow_direction: FlowDirection,
    pub culvert_type: CulvertType,
    pub inlet_level: f64,
    pub outlet_level: f64,
    pub length: f64,
    pub inlet_loss_coefficient: f64,
    pub outlet_loss_coefficient: f64,
    pub bend_loss_coefficient: f64,
    /// Unset when the referenced cross-section is missing or has an unsupported shape.
    pub geometry: Option<CulvertGeometry>,
    pub is_gated: bool,
    pub initial_gate_opening: f64,
    pub gate_loss_table: Vec<ValveRow>,
    pub friction: StructureFriction,
}

impl Culvert {
    pub fn update_from(&mut self, other: &Culvert) {
        self.name.clone_from(&other.name);
        self.long_name.clone_from(&other.long_name);
        self.flow_direction = other.flow_direction;
        self.culvert_type = other.culvert_type;
        self.inlet_level = other.inlet_level;
        self.outlet_level = other.outlet_level;
        self.length = other.length;
        self.inlet_loss_coefficient = other.inlet_loss_coefficient;
        self.outlet_loss_coefficient = other.outlet_loss_coefficient;
        self.bend_loss_coefficient = other.bend_loss_coefficient;
        self.geometry.clone_from(&other.geometry);
        self.is_gated = other.is_gated;
        self.initial_gate_opening = other.initial_gate_opening;
        self.gate_loss_table.clone_from(&other.gate_loss_table);
        self.friction = other.friction;
    }
}

/// A typed structure instance placed in a composite on a branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Weir(Weir),
    Orifice(Orifice),
    Pump(Pump),
    Bridge(Bridge),
    Culvert(Culvert),
}

impl Structure {
    pub fn family(&self) -> StructureFamily {
        match self {
            Self::Weir(_) => StructureFamily::Weir,
            Self::Orifice(_) => StructureFamily::Orifice,
            Self::Pump(_) => StructureFamily::Pump,
            Self::Bridge(_) => StructureFamily::Bridge,
            Self::Culvert(_) => StructureFamily::Culvert,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Weir(s) => &s.name,
            Self::Orifice(s) => &s.name,
            Self::Pump(s) => &s.name,
            Self::Bridge(s) => &s.name,
            Self::Culvert(s) => &s.name,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Self::Weir(s) => s.name = name,
            Self::Orifice(s) => s.name = name,
            Self::Pump(s) => s.name = name,
            Self::Bridge(s) => s.name = name,
            Self::Culvert(s) => s.name = name,
        }
    }

    pub fn long_name(&self) -> &str {
        match self {
            Self::Weir(s) => &s.long_name,
            Self::Orifice(s) => &s.long_name,
            Self::Pump(s) => &s.long_name,
            Self::Bridge(s) => &s.long_name,
            Self::Culvert(s) => &s.long_name,
        }
    }

    pub fn set_long_name(&mut self, long_name: &str) {
        let target = match self {
            Self::Weir(s) => &mut s.long_name,
            Self::Orifice(s) => &mut s.long_name,
            Self::Pump(s) => &mut s.long_name,
            Self::Bridge(s) => &mut s.long_name,
            Self::Culvert(s) => &mut s.long_name,
        };
        long_name.clone_into(target);
    }

    /// Copies every field of `other` onto `self`, keeping `self` in place.
    ///
    /// Returns `false` without touching `self` when the families differ.
    pub fn update_from(&mut self, other: &Structure) -> bool {
        match (self, other) {
            (Self::Weir(a), Self::Weir(b)) => a.update_from(b),
            (Self::Orifice(a), Self::Orifice(b)) => a.update_from(b),
            (Self::Pump(a), Self::Pump(b)) => a.update_from(b),
            (Self::Bridge(a), Self::Bridge(b)) => a.update_from(b),
            (Self::Culvert(a), Self::Culvert(b)) => a.update_from(b),
            _ => return false,
        }
        true
    }
}
