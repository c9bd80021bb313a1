use super::error::ImportError;
use crate::core::hydraulics::cross_section::{CrossSectionLookup, YzPoint};
use crate::core::models::formula::{
    FreeFormWeirFormula, GatedWeirFormula, GeneralStructureFormula, PierWeirFormula,
    RiverWeirFormula, SimpleWeirFormula, WeirFormula,
};
use crate::core::models::records::{
    DefinitionKind, GeneralStructureData, OrificeData, RiverAdvancedWeirData, RiverWeirData,
    SimpleWeirData, StructureDefinition, UniversalWeirData,
};

/// Builds the weir formula that matches a weir-family definition.
///
/// # Errors
///
/// Returns [`ImportError::UnsupportedFormula`] for definitions that are not weirs. The weir
/// builder filters on type code before calling this, so reaching that arm is a dispatch bug.
pub fn create_formula(
    definition: &StructureDefinition,
    cross_sections: &CrossSectionLookup,
) -> Result<WeirFormula, ImportError> {
    match &definition.kind {
        DefinitionKind::RiverWeir(data) => Ok(WeirFormula::River(river_weir(data))),
        DefinitionKind::RiverAdvancedWeir(data) => Ok(WeirFormula::Pier(pier_weir(data))),
        DefinitionKind::GeneralStructure(data) => {
            Ok(WeirFormula::GeneralStructure(general_structure(data)))
        }
        DefinitionKind::Weir(data) => Ok(WeirFormula::Simple(simple_weir(data))),
        DefinitionKind::Orifice(data) => Ok(WeirFormula::Gated(gated_weir(data))),
        DefinitionKind::UniversalWeir(data) => {
            Ok(WeirFormula::FreeForm(free_form_weir(data, cross_sections)))
        }
        other => Err(ImportError::UnsupportedFormula {
            definition_id: definition.id.clone(),
            type_code: other.type_code(),
        }),
    }
}

fn river_weir(data: &RiverWeirData) -> RiverWeirFormula {
    RiverWeirFormula {
        crest_shape: data.crest_shape,
        correction_coefficient_positive: data.correction_coefficient_positive,
        correction_coefficient_negative: data.correction_coefficient_negative,
        submerge_limit_positive: data.submerge_limit_positive,
        submerge_limit_negative: data.submerge_limit_negative,
        reduction_positive: data.reduction_positive.clone(),
        reduction_negative: data.reduction_negative.clone(),
    }
}

fn pier_weir(data: &RiverAdvancedWeirData) -> PierWeirFormula {
    PierWeirFormula {
        number_of_piers: data.number_of_piers,
        positive: data.positive,
        negative: data.negative,
    }
}

fn general_structure(data: &GeneralStructureData) -> GeneralStructureFormula {
    // The older format already stores the opening instead of the gate's lower edge level.
    let gate_opening = if data.from_legacy_format {
        data.gate_height
    } else {
        data.gate_height - data.bed_levels.centre
    };
    GeneralStructureFormula {
        widths: data.widths,
        bed_levels: data.bed_levels,
        gate_opening,
        positive: data.positive,
        negative: data.negative,
        extra_resistance: data.extra_resistance.unwrap_or(0.0),
    }
}

fn simple_weir(data: &SimpleWeirData) -> SimpleWeirFormula {
    SimpleWeirFormula {
        discharge_coefficient: data.discharge_coefficient,
        lateral_contraction: data.lateral_contraction,
    }
}

fn gated_weir(data: &OrificeData) -> GatedWeirFormula {
    GatedWeirFormula {
        gate_opening: data.gate_height - data.crest_level,
        contraction_coefficient: data.contraction_coefficient * data.lateral_contraction,
        lateral_contraction: data.lateral_contraction,
        max_positive_flow: data.max_positive_flow,
        max_negative_flow: data.max_negative_flow,
    }
}

fn free_form_weir(
    data: &UniversalWeirData,
    cross_sections: &CrossSectionLookup,
) -> FreeFormWeirFormula {
    let shape = cross_sections
        .get(&data.cross_section_id)
        .and_then(|cross_section| cross_section.kind.to_yz())
        .map(|points| {
            points
                .into_iter()
                .map(|p| YzPoint::new(p.y, p.z + data.crest_level_shift))
                .collect()
        });
    FreeFormWeirFormula {
        shape,
        discharge_coefficient: data.discharge_coefficient,
    }
}
