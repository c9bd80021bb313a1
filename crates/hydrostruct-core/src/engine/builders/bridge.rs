use super::{BuildContext, flow_direction};
use crate::core::hydraulics::cross_section::ShapeKind;
use crate::core::models::records::{BridgeData, BridgeKind, DefinitionKind, StructureDefinition};
use crate::core::models::structure::{Bridge, BridgeType, Structure, StructureFriction};
use crate::engine::error::ImportError;
use std::collections::HashMap;
use std::fmt;

pub const TYPE_CODE: i32 = 12;

/// Applies the type-specific part of a bridge definition.
pub trait BridgeInitializer: Send + Sync {
    fn initialize(&self, bridge: &mut Bridge, data: &BridgeData, ctx: &BuildContext<'_>);
}

/// Pillar bridges: the opening is described by the pillar width and its shape factor.
#[derive(Debug, Default)]
pub struct PillarInitializer;

impl BridgeInitializer for PillarInitializer {
    fn initialize(&self, bridge: &mut Bridge, data: &BridgeData, _ctx: &BuildContext<'_>) {
        bridge.bridge_type = BridgeType::Pillar;
        bridge.pillar_width = data.pillar_width;
        bridge.shape_factor = data.shape_factor;
    }
}

/// Abutment and fixed-bed bridges: the opening comes from a tabulated cross-section.
#[derive(Debug, Default)]
pub struct ProfileInitializer;

impl BridgeInitializer for ProfileInitializer {
    fn initialize(&self, bridge: &mut Bridge, data: &BridgeData, ctx: &BuildContext<'_>) {
        let rows = match ctx.cross_sections.get(&data.cross_section_id).map(|cs| &cs.kind) {
            Some(ShapeKind::Tabulated { rows }) if !rows.is_empty() => rows,
            Some(kind) => {
                ctx.reporter.warn(format!(
                    "Cross-section '{}' of bridge '{}' has unsupported shape {}; a rectangular profile is used.",
                    data.cross_section_id,
                    bridge.name,
                    kind.discriminator()
                ));
                return;
            }
            None => {
                ctx.reporter.warn(format!(
                    "Cross-section '{}' of bridge '{}' not found; a rectangular profile is used.",
                    data.cross_section_id, bridge.name
                ));
                return;
            }
        };

        let min_level = rows.iter().map(|r| r.level).fold(f64::INFINITY, f64::min);
        let max_level = rows.iter().map(|r| r.level).fold(f64::NEG_INFINITY, f64::max);
        bridge.bridge_type = BridgeType::Tabulated;
        bridge.width = rows.iter().map(|r| r.total_width).fold(0.0, f64::max);
        bridge.height = max_level - min_level;
        bridge.tabulated_profile.clone_from(rows);
    }
}

/// Soil-bed bridges: a profile bridge with a ground layer of the given thickness.
#[derive(Debug, Default)]
pub struct SoilBedInitializer {
    profile: ProfileInitializer,
}

impl BridgeInitializer for SoilBedInitializer {
    fn initialize(&self, bridge: &mut Bridge, data: &BridgeData, ctx: &BuildContext<'_>) {
        self.profile.initialize(bridge, data, ctx);
        let thickness = data.ground_layer_thickness.unwrap_or(0.0);
        bridge.friction.ground_layer.enabled = thickness > 0.0;
        bridge.friction.ground_layer.thickness = thickness;
    }
}

/// Initializers keyed by legacy bridge type.
pub struct BridgeInitializers {
    initializers: HashMap<BridgeKind, Box<dyn BridgeInitializer>>,
}

impl Default for BridgeInitializers {
    fn default() -> Self {
        let mut initializers = Self {
            initializers: HashMap::new(),
        };
        initializers.register(BridgeKind::Pillar, Box::new(PillarInitializer));
        initializers.register(BridgeKind::Abutment, Box::new(ProfileInitializer));
        initializers.register(BridgeKind::FixedBed, Box::new(ProfileInitializer));
        initializers.register(BridgeKind::SoilBed, Box::new(SoilBedInitializer::default()));
        initializers
    }
}

impl BridgeInitializers {
    /// Replaces the initializer for a bridge type.
    pub fn register(&mut self, kind: BridgeKind, initializer: Box<dyn BridgeInitializer>) {
        self.initializers.insert(kind, initializer);
    }

    pub fn get(&self, kind: BridgeKind) -> Option<&dyn BridgeInitializer> {
        self.initializers.get(&kind).map(|b| b.as_ref())
    }
}

impl fmt::Debug for BridgeInitializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.initializers.keys()).finish()
    }
}

pub fn build(
    definition: &StructureDefinition,
    ctx: &BuildContext<'_>,
    initializers: &BridgeInitializers,
) -> Result<Vec<Structure>, ImportError> {
    let DefinitionKind::Bridge(data) = &definition.kind else {
        return Err(ImportError::Internal(format!(
            "bridge builder called for definition '{}' of type {}",
            definition.id,
            definition.kind.type_code()
        )));
    };

    let mut bridge = Bridge {
        name: definition.name.clone(),
        flow_direction: flow_direction(definition, data.flow_direction)?,
        shift: data.bed_level,
        length: data.length,
        inlet_loss_coefficient: data.inlet_loss_coefficient,
        outlet_loss_coefficient: data.outlet_loss_coefficient,
        friction: StructureFriction::new(
            ctx.config.default_friction_type,
            ctx.config.default_friction_value,
        ),
        ..Bridge::default()
    };

    match initializers.get(data.bridge_type) {
        Some(initializer) => initializer.initialize(&mut bridge, data, ctx),
        None => ctx.reporter.warn(format!(
            "No initializer registered for bridge type {:?}; bridge '{}' keeps its standard fields only.",
            data.bridge_type, bridge.name
        )),
    }

    Ok(vec![Structure::Bridge(bridge)])
}
