//! Closed domain enumerations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Recyclable material category accepted at collection points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteType {
    #[serde(rename = "aluminio")]
    Aluminum,
    #[serde(rename = "vidro")]
    Glass,
    #[serde(rename = "pano")]
    Cloth,
    #[serde(rename = "pet")]
    Pet,
}

impl WasteType {
    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Aluminum => "aluminio",
            WasteType::Glass => "vidro",
            WasteType::Cloth => "pano",
            WasteType::Pet => "pet",
        }
    }

    pub fn all() -> &'static [WasteType] {
        &[WasteType::Aluminum, WasteType::Glass, WasteType::Cloth, WasteType::Pet]
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WasteType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aluminio" => Ok(WasteType::Aluminum),
            "vidro" => Ok(WasteType::Glass),
            "pano" => Ok(WasteType::Cloth),
            "pet" => Ok(WasteType::Pet),
            _ => Err(CoreError::InvalidWasteType(s.to_string())),
        }
    }
}

/// Class shift (turno)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "matutino")]
    Morning,
    #[serde(rename = "vespertino")]
    Afternoon,
    #[serde(rename = "noturno")]
    Evening,
    #[serde(rename = "integral")]
    FullTime,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "matutino",
            Shift::Afternoon => "vespertino",
            Shift::Evening => "noturno",
            Shift::FullTime => "integral",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shift {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matutino" => Ok(Shift::Morning),
            "vespertino" => Ok(Shift::Afternoon),
            "noturno" => Ok(Shift::Evening),
            "integral" => Ok(Shift::FullTime),
            _ => Err(CoreError::InvalidShift(s.to_string())),
        }
    }
}
