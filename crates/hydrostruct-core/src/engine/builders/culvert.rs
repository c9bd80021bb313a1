use super::{BuildContext, display_name, flow_direction};
use crate::core::hydraulics::cross_section::{
    CrossSectionShape, ShapeKind, StandardProfile, TabulatedRow,
};
use crate::core::models::records::{CulvertData, CulvertVariant, DefinitionKind, StructureDefinition};
use crate::core::models::structure::{
    Culvert, CulvertGeometry, CulvertType, GroundLayer, Structure, StructureFriction,
};
use crate::engine::error::ImportError;

/// Culvert, siphon and inverted siphon share one legacy type.
pub const TYPE_CODE: i32 = 10;

pub fn build(
    definition: &StructureDefinition,
    ctx: &BuildContext<'_>,
) -> Result<Vec<Structure>, ImportError> {
    let DefinitionKind::Culvert(data) = &definition.kind else {
        return Err(ImportError::Internal(format!(
            "culvert builder called for definition '{}' of type {}",
            definition.id,
            definition.kind.type_code()
        )));
    };

    let culvert_type = match data.variant {
        CulvertVariant::Culvert => CulvertType::Culvert,
        CulvertVariant::InvertedSiphon => CulvertType::InvertedSiphon,
        CulvertVariant::Siphon => {
            ctx.reporter.warn(format!(
                "Siphon '{}' (id = {}) is not supported; it is not imported.",
                display_name(definition),
                definition.id
            ));
            return Ok(Vec::new());
        }
    };

    let thickness = data.ground_layer_thickness.unwrap_or(0.0);
    let mut culvert = Culvert {
        name: definition.name.clone(),
        flow_direction: flow_direction(definition, data.flow_direction)?,
        culvert_type,
        inlet_level: data.inlet_level,
        outlet_level: data.outlet_level,
        length: data.length,
        inlet_loss_coefficient: data.inlet_loss_coefficient,
        outlet_loss_coefficient: data.outlet_loss_coefficient,
        bend_loss_coefficient: match culvert_type {
            CulvertType::InvertedSiphon => data.bend_loss_coefficient,
            CulvertType::Culvert => 0.0,
        },
        geometry: geometry(definition, data, ctx),
        friction: StructureFriction {
            ground_layer: GroundLayer {
                enabled: thickness > 0.0,
                thickness,
                roughness: 0.0,
            },
            ..StructureFriction::new(
                ctx.config.default_friction_type,
                ctx.config.default_friction_value,
            )
        },
        ..Culvert::default()
    };

    if data.use_loss_table {
        culvert.is_gated = true;
        culvert.initial_gate_opening = data.initial_gate_opening;
        match ctx.valve_tables.iter().find(|t| t.id == data.valve_table_id) {
            Some(table) => culvert.gate_loss_table.clone_from(&table.rows),
            None => ctx.reporter.warn(format!(
                "Valve table '{}' of culvert '{}' not found; the gate loss table is left empty.",
                data.valve_table_id,
                display_name(definition)
            )),
        }
    }

    Ok(vec![Structure::Culvert(culvert)])
}

fn geometry(
    definition: &StructureDefinition,
    data: &CulvertData,
    ctx: &BuildContext<'_>,
) -> Option<CulvertGeometry> {
    let Some(shape) = ctx.cross_sections.get(&data.cross_section_id) else {
        ctx.reporter.warn(format!(
            "Cross-section '{}' of culvert '{}' not found; the culvert has no geometry.",
            data.cross_section_id,
            display_name(definition)
        ));
        return None;
    };

    match &shape.kind {
        ShapeKind::Tabulated { rows } => Some(tabulated_geometry(shape, rows)),
        ShapeKind::ClosedCircle { radius } => Some(CulvertGeometry::Round {
            diameter: 2.0 * radius,
        }),
        ShapeKind::EggShape { width } => Some(CulvertGeometry::Egg {
            width: *width,
            height: 1.5 * width,
        }),
        other => {
            ctx.reporter.warn(format!(
                "Cross-section '{}' of culvert '{}' has unsupported shape {}; the culvert has no geometry.",
                shape.id,
                display_name(definition),
                other.discriminator()
            ));
            None
        }
    }
}

fn tabulated_geometry(
    shape: &CrossSectionShape,
    rows: &[TabulatedRow],
) -> CulvertGeometry {
    // A generated rectangle is stored as bottom and top rows of equal width.
    match (shape.standard_profile(), rows) {
        (Some(StandardProfile::Rectangle), [bottom, top, ..]) => CulvertGeometry::Rectangle {
            width: bottom.total_width,
            height: top.level - bottom.level,
        },
        _ => CulvertGeometry::Tabulated {
            rows: rows.to_vec(),
        },
    }
}
