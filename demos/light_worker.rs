use netsafe::{analyze, force_deflection_curve, ScenarioPreset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ScenarioPreset::LightWorker.config();
    println!("{}\n", config.summary());

    let result = analyze(&config)?;
    let response = result.structural_response;
    println!("max deflection = {:.4} m", response.max_deflection);
    println!("max stress     = {:.3e} Pa", response.max_stress);
    println!("safety factor  = {:.2}", response.safety_factor);

    // A few points of the force law around the solved deflection.
    let curve = force_deflection_curve(&result);
    for (delta, force) in curve.deflection.iter().zip(&curve.force).step_by(20) {
        println!("F({delta:.3} m) = {force:.1} N");
    }
    println!(
        "solved point: F({:.3} m) = {:.1} N",
        curve.solved.deflection, curve.solved.force
    );

    Ok(())
}
