//! Classification labels and the die types that generate them.

use std::fmt;

use crate::error::SorterError;

/// Destination of a sorted image. The textual form names the subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Face value shown on the die, starting at 1.
    Face(u32),
    /// Image could not be read as a die roll.
    Invalid,
}

impl Label {
    /// Name of the subdirectory under the root that collects this label.
    pub fn dir_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Face(value) => write!(f, "{value}"),
            Label::Invalid => f.write_str("invalid"),
        }
    }
}

/// Number of sides on the die being sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DieType(u32);

impl DieType {
    pub fn new(sides: u32) -> Result<Self, SorterError> {
        if sides == 0 {
            return Err(SorterError::InvalidDieType(sides));
        }
        Ok(Self(sides))
    }

    pub fn sides(self) -> u32 {
        self.0
    }

    /// Labels offered for this die: every face in order, then `invalid`.
    pub fn labels(self) -> Vec<Label> {
        (1..=self.0)
            .map(Label::Face)
            .chain(std::iter::once(Label::Invalid))
            .collect()
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}
