use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;

/// One level of a tabulated profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TabulatedRow {
    pub level: f64,
    pub total_width: f64,
    #[serde(default)]
    pub flow_width: f64,
}

/// One point of a YZ profile: lateral position `y`, level `z`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct YzPoint {
    pub y: f64,
    pub z: f64,
}

impl YzPoint {
    pub fn new(y: f64, z: f64) -> Self {
        Self { y, z }
    }
}

/// Shape discriminator of a legacy cross-section definition, with its shape parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum ShapeKind {
    Tabulated {
        rows: Vec<TabulatedRow>,
    },
    Trapezium {
        slope: f64,
        bottom_width: f64,
        max_width: f64,
    },
    OpenCircle {
        radius: f64,
    },
    ClosedCircle {
        radius: f64,
    },
    EggShape {
        width: f64,
    },
    Yz {
        points: Vec<YzPoint>,
    },
    AsymmetricalTrapezium {
        points: Vec<YzPoint>,
    },
}

impl ShapeKind {
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Tabulated { .. } => "tabulated",
            Self::Trapezium { .. } => "trapezium",
            Self::OpenCircle { .. } => "open circle",
            Self::ClosedCircle { .. } => "closed circle",
            Self::EggShape { .. } => "egg shape",
            Self::Yz { .. } => "yz",
            Self::AsymmetricalTrapezium { .. } => "asymmetrical trapezium",
        }
    }

    /// Returns the profile as YZ points when the shape is expressible that way.
    ///
    /// Tabulated profiles are mirrored around their axis and shifted so that the leftmost
    /// point lies at `y = 0`.
    pub fn to_yz(&self) -> Option<Vec<YzPoint>> {
        match self {
            Self::Yz { points } | Self::AsymmetricalTrapezium { points } => Some(points.clone()),
            Self::Tabulated { rows } if !rows.is_empty() => {
                let half_max = rows
                    .iter()
                    .map(|row| row.total_width / 2.0)
                    .fold(0.0_f64, f64::max);
                let left = rows
                    .iter()
                    .rev()
                    .map(|row| YzPoint::new(half_max - row.total_width / 2.0, row.level));
                let right = rows
                    .iter()
                    .map(|row| YzPoint::new(half_max + row.total_width / 2.0, row.level));
                Some(left.chain(right).collect())
            }
            _ => None,
        }
    }
}

/// Standard profile a tabulated cross-section was generated from, encoded in its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardProfile {
    Arch,
    Cunette,
    Elliptical,
    Rectangle,
    SteelCunette,
}

static STANDARD_PROFILE_PREFIXES: Map<&'static str, StandardProfile> = phf_map! {
    "a_" => StandardProfile::Arch,
    "c_" => StandardProfile::Cunette,
    "e_" => StandardProfile::Elliptical,
    "r_" => StandardProfile::Rectangle,
    "s_" => StandardProfile::SteelCunette,
};

/// A legacy cross-section definition, referenced by id from structure definitions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrossSectionShape {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl CrossSectionShape {
    pub fn new(id: &str, name: &str, kind: ShapeKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    /// The standard profile named by the two-character prefix of the name, if any.
    pub fn standard_profile(&self) -> Option<StandardProfile> {
        let prefix = self.name.get(..2)?;
        STANDARD_PROFILE_PREFIXES.get(prefix).copied()
    }
}

/// Read-only lookup of cross-section shapes by id.
#[derive(Debug, Clone, Default)]
pub struct CrossSectionLookup {
    shapes: HashMap<String, CrossSectionShape>,
}

impl CrossSectionLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&CrossSectionShape> {
        self.shapes.get(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl FromIterator<CrossSectionShape> for CrossSectionLookup {
    fn from_iter<I: IntoIterator<Item = CrossSectionShape>>(iter: I) -> Self {
        Self {
            shapes: iter
                .into_iter()
                .map(|shape| (shape.id.clone(), shape))
                .collect(),
        }
    }
}
