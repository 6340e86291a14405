//! Built-in material and scenario catalogs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{GeometryParameters, ImpactScenario, MaterialProperties, NetConfig};
use crate::errors::ConfigError;

/// Strand materials shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    /// Nylon rope.
    Nylon,
    /// Polyester rope.
    Polyester,
    /// Polypropylene rope.
    Polypropylene,
    /// Steel cable.
    Steel,
}

impl MaterialPreset {
    /// Every material preset in catalog order.
    pub const ALL: [Self; 4] = [
        Self::Nylon,
        Self::Polyester,
        Self::Polypropylene,
        Self::Steel,
    ];

    /// Catalog key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nylon => "nylon",
            Self::Polyester => "polyester",
            Self::Polypropylene => "polypropylene",
            Self::Steel => "steel",
        }
    }

    /// Material record for this preset.
    ///
    /// # Examples
    /// ```
    /// use netsafe::MaterialPreset;
    ///
    /// let steel = MaterialPreset::Steel.properties();
    /// assert_eq!(steel.name, "Steel Cable");
    /// assert_eq!(steel.elastic_modulus, 2.0e11);
    /// ```
    #[must_use]
    pub fn properties(self) -> MaterialProperties {
        match self {
            Self::Nylon => MaterialProperties::new("Nylon", 3.5e9, 8.0e7, 1150.0, 2.0e-6),
            Self::Polyester => MaterialProperties::new("Polyester", 4.2e9, 9.0e7, 1380.0, 2.0e-6),
            Self::Polypropylene => {
                MaterialProperties::new("Polypropylene", 2.8e9, 6.5e7, 900.0, 2.0e-6)
            }
            Self::Steel => MaterialProperties::new("Steel Cable", 2.0e11, 5.0e8, 7850.0, 1.0e-6),
        }
    }
}

impl fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MaterialPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset {
                name: s.to_owned(),
                available: Self::ALL.iter().map(|preset| preset.key()).collect(),
            })
    }
}

/// Complete example scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    /// A worker falling onto a nylon net.
    LightWorker,
    /// Dropped equipment caught by a polyester net.
    HeavyEquipment,
    /// General construction-site protection with polypropylene.
    ConstructionSite,
}

impl ScenarioPreset {
    /// Every scenario preset in catalog order.
    pub const ALL: [Self; 3] = [
        Self::LightWorker,
        Self::HeavyEquipment,
        Self::ConstructionSite,
    ];

    /// Catalog key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LightWorker => "light_worker",
            Self::HeavyEquipment => "heavy_equipment",
            Self::ConstructionSite => "construction_site",
        }
    }

    /// Display label carried into results.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LightWorker => "Light Worker",
            Self::HeavyEquipment => "Heavy Equipment",
            Self::ConstructionSite => "Construction Site",
        }
    }

    /// Full configuration for this scenario.
    #[must_use]
    pub fn config(self) -> NetConfig {
        let (material, geometry, impact) = match self {
            Self::LightWorker => (
                MaterialPreset::Nylon,
                GeometryParameters::new(3.0, 40).with_safety_factor_min(2.5),
                ImpactScenario::new(70.0, 2.0),
            ),
            Self::HeavyEquipment => (
                MaterialPreset::Polyester,
                GeometryParameters::new(3.5, 60).with_safety_factor_min(3.0),
                ImpactScenario::new(150.0, 1.5),
            ),
            Self::ConstructionSite => (
                MaterialPreset::Polypropylene,
                GeometryParameters::new(4.0, 50).with_safety_factor_min(2.0),
                ImpactScenario::new(100.0, 3.0),
            ),
        };
        NetConfig::new(self.label(), material.properties(), geometry, impact)
    }
}

impl fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset {
                name: s.to_owned(),
                available: Self::ALL.iter().map(|preset| preset.key()).collect(),
            })
    }
}
