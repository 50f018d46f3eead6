use crate::error::PathError;

/// Constraint between the two interpolants of a pass point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[repr(u8)]
pub enum Continuity {
    /// Interpolants move independently
    C0 = 0,
    /// Interpolants stay collinear through the anchor, each keeps its own length
    #[default]
    C1 = 1,
    /// Interpolants stay collinear through the anchor with equal lengths
    C2 = 2,
}

impl Continuity {
    pub const ALL: [Continuity; 3] = [Continuity::C0, Continuity::C1, Continuity::C2];
}

impl TryFrom<u8> for Continuity {
    type Error = PathError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Continuity::C0),
            1 => Ok(Continuity::C1),
            2 => Ok(Continuity::C2),
            other => Err(PathError::InvalidContinuity(other)),
        }
    }
}

impl From<Continuity> for u8 {
    fn from(value: Continuity) -> Self {
        value as u8
    }
}
