//! Result field selectors.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type LoadCase = i32;
pub type Rsn = i32;

/// Plate bending moment component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MomentField {
    Mx,
    #[default]
    My,
    Mxy,
}

/// Nodal displacement component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplacementField {
    Ux,
    Uy,
    #[default]
    Uz,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl Display for UnknownField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown result field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl MomentField {
    pub const ALL: [MomentField; 3] = [MomentField::Mx, MomentField::My, MomentField::Mxy];

    pub fn as_str(self) -> &'static str {
        match self {
            MomentField::Mx => "Mx",
            MomentField::My => "My",
            MomentField::Mxy => "Mxy",
        }
    }

    /// Parses a selector, falling back to [`MomentField::My`] for anything unrecognised.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl DisplacementField {
    pub const ALL: [DisplacementField; 3] = [
        DisplacementField::Ux,
        DisplacementField::Uy,
        DisplacementField::Uz,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplacementField::Ux => "Ux",
            DisplacementField::Uy => "Uy",
            DisplacementField::Uz => "Uz",
        }
    }

    /// Parses a selector, falling back to [`DisplacementField::Uz`] for anything unrecognised.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for MomentField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mx" => Ok(MomentField::Mx),
            "my" => Ok(MomentField::My),
            "mxy" => Ok(MomentField::Mxy),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

impl FromStr for DisplacementField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ux" => Ok(DisplacementField::Ux),
            "uy" => Ok(DisplacementField::Uy),
            "uz" => Ok(DisplacementField::Uz),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

impl Display for MomentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for DisplacementField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which result a sheet or scene is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultSelection {
    Moments { lc: LoadCase, field: MomentField },
    Displacements { rsn: Rsn, field: DisplacementField },
}

impl ResultSelection {
    pub fn kind_title(&self) -> &'static str {
        match self {
            ResultSelection::Moments { .. } => "Moments",
            ResultSelection::Displacements { .. } => "Displacements",
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            ResultSelection::Moments { field, .. } => field.as_str(),
            ResultSelection::Displacements { field, .. } => field.as_str(),
        }
    }
}
