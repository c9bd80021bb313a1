use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Roughness formulation of a bridge or culvert.
///
/// The discriminants follow the legacy friction type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrictionType {
    #[default]
    Chezy,
    Manning,
    StricklerKn,
    StricklerKs,
    WhiteColebrook,
}

/// How the friction value of a legacy record varies; only `Constant` is usable for structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrictionFunction {
    #[default]
    Constant,
    FunctionOfQ,
    FunctionOfH,
    FunctionOfLocation,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no friction type is defined for code {code}")]
pub struct UnknownFrictionType {
    pub code: i32,
}

impl TryFrom<i32> for FrictionType {
    type Error = UnknownFrictionType;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Chezy),
            1 => Ok(Self::Manning),
            2 => Ok(Self::StricklerKn),
            3 => Ok(Self::StricklerKs),
            4 => Ok(Self::WhiteColebrook),
            _ => Err(UnknownFrictionType { code }),
        }
    }
}

impl fmt::Display for FrictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chezy => "Chezy",
            Self::Manning => "Manning",
            Self::StricklerKn => "Strickler Kn",
            Self::StricklerKs => "Strickler Ks",
            Self::WhiteColebrook => "White-Colebrook",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FrictionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constant => "constant",
            Self::FunctionOfQ => "function of discharge",
            Self::FunctionOfH => "function of water level",
            Self::FunctionOfLocation => "function of location",
        };
        f.write_str(name)
    }
}
