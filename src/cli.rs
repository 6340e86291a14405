use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use netsafe::{ImpactScenario, MaterialPreset, NetConfig, ScenarioPreset};

/// Check whether a safety net survives a fall impact.
#[derive(Parser, Debug)]
#[command(name = "netsafe")]
#[command(about = "Energy-balance impact analysis for catenary safety nets")]
pub struct Args {
    /// Scenario preset (light_worker, heavy_equipment, construction_site)
    #[arg(long, conflicts_with = "config")]
    pub preset: Option<ScenarioPreset>,

    /// JSON configuration document to analyse instead of a preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replace the strand material with a preset (nylon, polyester, polypropylene, steel)
    #[arg(long)]
    pub material: Option<MaterialPreset>,

    /// Override the falling mass in kg
    #[arg(long)]
    pub mass: Option<f64>,

    /// Override the fall height in m; the impact velocity is re-derived
    #[arg(long)]
    pub height: Option<f64>,

    /// Seed for the illustrative stress scatter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the effective configuration document to this file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// List the material and scenario presets and exit
    #[arg(long)]
    pub list: bool,
}

/// How the analysis is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text report.
    Text,
    /// Report data bundle as JSON.
    Json,
}

impl Args {
    /// Assemble the configuration selected on the command line.
    ///
    /// Without `--preset` or `--config` the default configuration is used.
    pub fn load_config(&self) -> Result<NetConfig, Box<dyn Error>> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => NetConfig::from_json(&fs::read_to_string(path)?)?,
            (None, Some(preset)) => preset.config(),
            (None, None) => NetConfig::default(),
        };

        if let Some(material) = self.material {
            config.material = material.properties();
        }
        if self.mass.is_some() || self.height.is_some() {
            let mass = self.mass.unwrap_or(config.impact.mass);
            let height = self.height.unwrap_or(config.impact.fall_height);
            config.impact = ImpactScenario::new(mass, height);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_and_overrides_are_applied() {
        let args = Args::parse_from([
            "netsafe",
            "--preset",
            "heavy_equipment",
            "--material",
            "steel",
            "--height",
            "0",
        ]);
        let config = args.load_config().expect("configuration assembles");
        assert_eq!(config.scenario_name, "Heavy Equipment");
        assert_eq!(config.material.name, "Steel Cable");
        assert!((config.impact.mass - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.impact.impact_velocity, 0.0);
    }

    #[test]
    fn defaults_without_selection() {
        let args = Args::parse_from(["netsafe"]);
        assert_eq!(args.format, OutputFormat::Text);
        let config = args.load_config().expect("configuration assembles");
        assert_eq!(config, NetConfig::default());
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(Args::try_parse_from(["netsafe", "--preset", "rooftop"]).is_err());
    }
}
