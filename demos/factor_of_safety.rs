use netsafe::{analyze, MaterialPreset, ScenarioPreset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start from the construction-site scenario
    let mut config = ScenarioPreset::ConstructionSite.config();

    // Try every strand material on the same net and fall
    for preset in MaterialPreset::ALL {
        config.material = preset.properties();
        let result = analyze(&config)?;

        // Report the factor of safety against the required minimum
        let response = result.structural_response;
        println!(
            "{:<14} factor of safety {:>7.2} (minimum {:.1}) -> {}",
            config.material.name,
            response.safety_factor,
            result.design_limits.min_safety_factor,
            if result.design_checks.overall_safe {
                "safe"
            } else {
                "unsafe"
            }
        );
    }

    // All done
    Ok(())
}
