use crate::core::hydraulics::cross_section::YzPoint;
use crate::core::models::records::{FlowCoefficients, PierCoefficients, SectionValues};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleWeirFormula {
    pub discharge_coefficient: f64,
    pub lateral_contraction: f64,
}

impl Default for SimpleWeirFormula {
    fn default() -> Self {
        Self {
            discharge_coefficient: 1.0,
            lateral_contraction: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiverWeirFormula {
    pub crest_shape: i32,
    pub correction_coefficient_positive: f64,
    pub correction_coefficient_negative: f64,
    pub submerge_limit_positive: f64,
    pub submerge_limit_negative: f64,
    pub reduction_positive: Vec<(f64, f64)>,
    pub reduction_negative: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PierWeirFormula {
    pub number_of_piers: u32,
    pub positive: PierCoefficients,
    pub negative: PierCoefficients,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatedWeirFormula {
    pub gate_opening: f64,
    pub contraction_coefficient: f64,
    pub lateral_contraction: f64,
    pub max_positive_flow: Option<f64>,
    pub max_negative_flow: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralStructureFormula {
    pub widths: SectionValues,
    pub bed_levels: SectionValues,
    pub gate_opening: f64,
    pub positive: FlowCoefficients,
    pub negative: FlowCoefficients,
    pub extra_resistance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeFormWeirFormula {
    /// Crest profile; `None` when the referenced cross-section could not be resolved.
    pub shape: Option<Vec<YzPoint>>,
    pub discharge_coefficient: f64,
}

impl FreeFormWeirFormula {
    /// Lowest level of the crest profile.
    pub fn crest_level(&self) -> Option<f64> {
        self.shape
            .as_ref()
            .and_then(|points| points.iter().map(|p| p.z).reduce(f64::min))
    }

    /// Lateral extent of the crest profile.
    pub fn crest_width(&self) -> Option<f64> {
        let points = self.shape.as_ref()?;
        let min = points.iter().map(|p| p.y).reduce(f64::min)?;
        let max = points.iter().map(|p| p.y).reduce(f64::max)?;
        Some(max - min)
    }
}

/// Hydraulic coefficient set of a weir or orifice.
#[derive(Debug, Clone, PartialEq)]
pub enum WeirFormula {
    Simple(SimpleWeirFormula),
    River(RiverWeirFormula),
    Pier(PierWeirFormula),
    Gated(GatedWeirFormula),
    GeneralStructure(GeneralStructureFormula),
    FreeForm(FreeFormWeirFormula),
}

impl Default for WeirFormula {
    fn default() -> Self {
        Self::Simple(SimpleWeirFormula::default())
    }
}

impl WeirFormula {
    /// A gated formula describes a controllable gate; such weirs are materialized as orifices.
    pub fn is_gated(&self) -> bool {
        matches!(self, Self::Gated(_))
    }

    pub fn is_free_form(&self) -> bool {
        matches!(self, Self::FreeForm(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple weir",
            Self::River(_) => "river weir",
            Self::Pier(_) => "pier weir",
            Self::Gated(_) => "gated weir",
            Self::GeneralStructure(_) => "general structure",
            Self::FreeForm(_) => "free form weir",
        }
    }
}
