use std::path::Path;

use macroplan_core::{replay, DayScenario, RedistributionReason};

pub fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    let scenario: DayScenario = serde_json::from_str(&raw)
        .map_err(|e| format!("failed to parse {}: {e}", file.display()))?;

    println!("scenario: {}", scenario.name);
    for snapshot in replay(&scenario) {
        println!(
            "\n{}  consumed {:.0} kcal",
            snapshot.at.format("%H:%M"),
            snapshot.consumed_calories
        );
        for rw in &snapshot.windows {
            let marker = match rw.reason {
                RedistributionReason::None => "",
                RedistributionReason::Overconsumption { .. } => " !over",
                RedistributionReason::Underconsumption { .. } => " !under",
            };
            println!(
                "  {}-{}  {:.0} -> {:.0} kcal{}",
                rw.window.start_time.format("%H:%M"),
                rw.window.end_time.format("%H:%M"),
                rw.window.target_calories,
                rw.adjusted_calories,
                marker,
            );
        }
    }
    Ok(())
}
