use super::{BuildContext, display_name, flow_direction};
use crate::core::models::formula::WeirFormula;
use crate::core::models::records::{DefinitionKind, StructureDefinition};
use crate::core::models::structure::{Orifice, Structure, Weir};
use crate::engine::error::ImportError;
use crate::engine::formula::create_formula;

/// River weir, river advanced weir, general structure, weir, orifice, universal weir.
pub const TYPE_CODES: [i32; 6] = [0, 1, 2, 6, 7, 11];

/// Builds one weir, or one orifice when the formula describes a gate.
///
/// River and pier formulas cannot be represented and produce nothing.
pub fn build(
    definition: &StructureDefinition,
    ctx: &BuildContext<'_>,
) -> Result<Vec<Structure>, ImportError> {
    let formula = create_formula(definition, ctx.cross_sections)?;

    if matches!(formula, WeirFormula::River(_) | WeirFormula::Pier(_)) {
        let id = if definition.id.trim().is_empty() {
            "<no id>"
        } else {
            definition.id.as_str()
        };
        ctx.reporter.warn(format!(
            "Weir '{}' (id = {}) uses a {} formula, which is not supported; the weir is not imported.",
            display_name(definition),
            id,
            formula.kind_name()
        ));
        return Ok(Vec::new());
    }

    let (crest_level, crest_width, direction_code) = match &definition.kind {
        DefinitionKind::GeneralStructure(data) => (
            data.bed_levels.centre,
            data.widths.centre,
            data.flow_direction,
        ),
        DefinitionKind::Weir(data) => (data.crest_level, data.crest_width, data.flow_direction),
        DefinitionKind::Orifice(data) => (data.crest_level, data.crest_width, data.flow_direction),
        DefinitionKind::UniversalWeir(data) => {
            let (level, width) = match &formula {
                WeirFormula::FreeForm(free_form) => (
                    free_form.crest_level(),
                    free_form.crest_width(),
                ),
                _ => (None, None),
            };
            let level = level.unwrap_or_else(|| {
                match ctx.cross_sections.get(&data.cross_section_id) {
                    Some(shape) => ctx.reporter.warn(format!(
                        "Cross-section '{}' of universal weir '{}' has unsupported shape {}; crest level set to the level shift {}.",
                        shape.id,
                        display_name(definition),
                        shape.kind.discriminator(),
                        data.crest_level_shift
                    )),
                    None => ctx.reporter.warn(format!(
                        "Cross-section '{}' of universal weir '{}' not found; crest level set to the level shift {}.",
                        data.cross_section_id,
                        display_name(definition),
                        data.crest_level_shift
                    )),
                }
                data.crest_level_shift
            });
            (level, width.unwrap_or(0.0), data.flow_direction)
        }
        other => {
            return Err(ImportError::UnsupportedFormula {
                definition_id: definition.id.clone(),
                type_code: other.type_code(),
            });
        }
    };

    let weir = Weir {
        flow_direction: flow_direction(definition, direction_code)?,
        crest_level,
        crest_width,
        formula,
        ..Weir::default()
    };

    if weir.formula.is_gated() {
        Ok(vec![Structure::Orifice(Orifice::from(weir))])
    } else {
        Ok(vec![Structure::Weir(weir)])
    }
}
