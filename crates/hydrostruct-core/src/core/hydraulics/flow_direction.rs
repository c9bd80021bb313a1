use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Direction(s) in which a structure lets water pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowDirection {
    #[default]
    Both,
    Positive,
    Negative,
    None,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Flow direction code {code} is not one of 0 (both), 1 (positive), 2 (negative), 3 (none)")]
pub struct InvalidFlowDirection {
    pub code: i32,
}

impl FlowDirection {
    /// Maps a legacy directional code to a flow direction. Codes outside 0..=3 are errors.
    pub fn from_code(code: i32) -> Result<Self, InvalidFlowDirection> {
        match code {
            0 => Ok(Self::Both),
            1 => Ok(Self::Positive),
            2 => Ok(Self::Negative),
            3 => Ok(Self::None),
            _ => Err(InvalidFlowDirection { code }),
        }
    }
}

impl TryFrom<i32> for FlowDirection {
    type Error = InvalidFlowDirection;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Both => "both",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_their_directions() {
        assert_eq!(FlowDirection::from_code(0), Ok(FlowDirection::Both));
        assert_eq!(FlowDirection::from_code(1), Ok(FlowDirection::Positive));
        assert_eq!(FlowDirection::from_code(2), Ok(FlowDirection::Negative));
        assert_eq!(FlowDirection::from_code(3), Ok(FlowDirection::None));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(
            FlowDirection::from_code(4),
            Err(InvalidFlowDirection { code: 4 })
        );
        assert!(FlowDirection::try_from(-1).is_err());
        assert!(FlowDirection::try_from(i32::MAX).is_err());
    }
}
