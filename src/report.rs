use std::fmt::Write;

use netsafe::{
    AnalysisResult, DeflectionSolution, MaterialPreset, ResultProjection, ScenarioPreset,
    HISTOGRAM_BINS,
};

/// Render a textual summary of the impact analysis.
///
/// The configuration summary comes first, followed by the peak response, the design
/// checks and a coarse text histogram of the illustrative strand stresses.
#[must_use]
pub fn render_summary(result: &AnalysisResult, projection: &ResultProjection) -> String {
    let mut output = result.input_parameters.summary();
    output.push_str("\n\n");

    let response = &result.structural_response;
    let limits = &result.design_limits;
    writeln!(&mut output, "Structural response").expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  - Max deflection: {:.4} m (limit {:.4} m)",
        response.max_deflection, limits.max_deflection_limit
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  - Max stress: {:.3e} Pa",
        response.max_stress
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  - Strain: {:.5} (limit {:.3})",
        response.strain, limits.max_strain_limit
    )
    .expect("writing to string cannot fail");
    if response.safety_factor.is_finite() {
        writeln!(
            &mut output,
            "  - Safety factor: {:.2} (minimum {:.2})",
            response.safety_factor, limits.min_safety_factor
        )
        .expect("writing to string cannot fail");
    } else {
        writeln!(
            &mut output,
            "  - Safety factor: unbounded, net carries no stress (minimum {:.2})",
            limits.min_safety_factor
        )
        .expect("writing to string cannot fail");
    }

    // Say which solver path produced the deflection so degraded runs are visible.
    let solver_line = match result.solver {
        DeflectionSolution::Converged { iterations, .. } => {
            format!("energy balance converged in {iterations} iterations")
        }
        DeflectionSolution::Fallback { cause, .. } => format!("linear estimate used ({cause})"),
    };
    writeln!(&mut output, "  - Solver: {solver_line}").expect("writing to string cannot fail");

    let checks = &result.design_checks;
    writeln!(&mut output, "\nDesign checks").expect("writing to string cannot fail");
    for (label, ok) in [
        ("Deflection", checks.deflection_ok),
        ("Stress", checks.stress_ok),
        ("Strain", checks.strain_ok),
        ("Overall", checks.overall_safe),
    ] {
        writeln!(
            &mut output,
            "  - {label:<10} {}",
            if ok { "PASS" } else { "FAIL" }
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "\nStress distribution across strands (illustrative, MPa)"
    )
    .expect("writing to string cannot fail");
    for bin in projection.stress_distribution.histogram(HISTOGRAM_BINS) {
        if bin.count == 0 {
            continue;
        }
        writeln!(
            &mut output,
            "  {:>9.3} - {:>9.3} | {}",
            bin.lower / 1.0e6,
            bin.upper / 1.0e6,
            "#".repeat(bin.count)
        )
        .expect("writing to string cannot fail");
    }

    output
}

/// List the built-in presets.
#[must_use]
pub fn render_catalog() -> String {
    let mut output = String::from("Materials\n");
    for preset in MaterialPreset::ALL {
        let material = preset.properties();
        writeln!(
            &mut output,
            "  {:<14} {:<14} E = {:.2e} Pa, yield = {:.2e} Pa, A = {:.1e} m²",
            preset.key(),
            material.name,
            material.elastic_modulus,
            material.yield_strength,
            material.cross_section_area
        )
        .expect("writing to string cannot fail");
    }
    output.push_str("\nScenarios\n");
    for preset in ScenarioPreset::ALL {
        let config = preset.config();
        writeln!(
            &mut output,
            "  {:<18} {} on a {} m {} net, {} kg from {} m",
            preset.key(),
            preset.label(),
            config.geometry.net_span,
            config.material.name,
            config.impact.mass,
            config.impact.fall_height
        )
        .expect("writing to string cannot fail");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use netsafe::{analyze, ImpactScenario, NetConfig, ResultProjection};

    #[test]
    fn formats_human_readable_report() {
        let result = analyze(&NetConfig::default()).expect("analysis runs");
        let projection = ResultProjection::seeded(&result, 11);
        let report = render_summary(&result, &projection);
        assert!(report.starts_with("Safety Net Configuration: default"));
        assert!(report.contains("Max deflection:"));
        assert!(report.contains("energy balance converged"));
        assert!(report.contains("Overall    PASS"));
        assert!(report.contains('#'));
    }

    #[test]
    fn unloaded_net_reports_unbounded_safety() {
        let mut config = NetConfig::default();
        config.impact = ImpactScenario::new(100.0, 0.0);
        let result = analyze(&config).expect("analysis runs");
        let projection = ResultProjection::seeded(&result, 11);
        let report = render_summary(&result, &projection);
        assert!(report.contains("Safety factor: unbounded"));
    }

    #[test]
    fn catalog_lists_every_preset() {
        let catalog = render_catalog();
        for key in ["nylon", "polyester", "polypropylene", "steel"] {
            assert!(catalog.contains(key));
        }
        for key in ["light_worker", "heavy_equipment", "construction_site"] {
            assert!(catalog.contains(key));
        }
    }
}
