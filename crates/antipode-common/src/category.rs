//! Antipodal lithosphere categories and display modes.

use serde::{Deserialize, Serialize};

/// Lithosphere type at a grid cell paired with the type at its antipode.
///
/// Codes match the `antipode_type` variable of the input dataset. Display
/// value 0 means "antipode in oceans" and 1 "antipode on continent", which
/// fixes the code order: the two continental cells come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum AntipodeCategory {
    /// Continent at the cell, ocean at its antipode.
    ContinentToOcean = 1,
    /// Continent at both ends.
    ContinentToContinent = 2,
    /// Ocean at the cell, continent at its antipode.
    OceanToContinent = 3,
    /// Ocean at both ends.
    OceanToOcean = 4,
}

impl AntipodeCategory {
    pub const ALL: [AntipodeCategory; 4] = [
        AntipodeCategory::ContinentToOcean,
        AntipodeCategory::ContinentToContinent,
        AntipodeCategory::OceanToContinent,
        AntipodeCategory::OceanToOcean,
    ];

    /// Look up a category from its dataset code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::ContinentToOcean),
            2 => Some(Self::ContinentToContinent),
            3 => Some(Self::OceanToContinent),
            4 => Some(Self::OceanToOcean),
            _ => None,
        }
    }

    /// Category for a pair of land flags.
    pub fn from_land(point_on_land: bool, antipode_on_land: bool) -> Self {
        match (point_on_land, antipode_on_land) {
            (true, false) => Self::ContinentToOcean,
            (true, true) => Self::ContinentToContinent,
            (false, true) => Self::OceanToContinent,
            (false, false) => Self::OceanToOcean,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn point_on_land(self) -> bool {
        matches!(self, Self::ContinentToOcean | Self::ContinentToContinent)
    }

    pub fn antipode_on_land(self) -> bool {
        matches!(self, Self::ContinentToContinent | Self::OceanToContinent)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ContinentToOcean => "continent to ocean",
            Self::ContinentToContinent => "continent to continent",
            Self::OceanToContinent => "ocean to continent",
            Self::OceanToOcean => "ocean to ocean",
        }
    }
}

/// How the four categories are collapsed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Only continental cells (codes 1 and 2) are colored; the rest are masked.
    #[default]
    ContinentsOnly,
    /// Every cell is colored by whether its antipode is on a continent.
    WithOceans,
}

impl DisplayMode {
    pub fn from_show_oceans(show_oceans: bool) -> Self {
        if show_oceans {
            Self::WithOceans
        } else {
            Self::ContinentsOnly
        }
    }

    pub fn show_oceans(self) -> bool {
        matches!(self, Self::WithOceans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for category in AntipodeCategory::ALL {
            assert_eq!(AntipodeCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(AntipodeCategory::from_code(0), None);
        assert_eq!(AntipodeCategory::from_code(5), None);
    }

    #[test]
    fn test_land_flags() {
        for category in AntipodeCategory::ALL {
            let rebuilt =
                AntipodeCategory::from_land(category.point_on_land(), category.antipode_on_land());
            assert_eq!(rebuilt, category);
        }
    }

    #[test]
    fn test_display_mode_flag() {
        assert_eq!(DisplayMode::from_show_oceans(true), DisplayMode::WithOceans);
        assert!(!DisplayMode::default().show_oceans());
    }
}
