use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;

use macroplan_core::{classify, redistribute, RedistributedWindow, RedistributionReason, Window};

use crate::planfile::PlanFile;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show the day's windows and their current state
    Show {
        /// Plan JSON file
        file: PathBuf,
    },
    /// Recompute upcoming windows' targets from the logged entries
    Redistribute {
        /// Plan JSON file
        file: PathBuf,
        /// Evaluate as of this RFC 3339 time instead of now
        #[arg(long)]
        at: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Show { file } => {
            let plan = PlanFile::load(&file)?;
            let now = Utc::now();
            for window in &plan.windows {
                println!("{}", describe_window(window, now));
            }
        }
        PlanAction::Redistribute { file, at, json } => {
            let plan = PlanFile::load(&file)?;
            let now = parse_at(at.as_deref())?;
            let result = redistribute(&plan.windows, &plan.entries, &plan.profile, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for rw in &result {
                    println!("{}", describe_adjustment(rw));
                }
            }
        }
    }
    Ok(())
}

fn parse_at(at: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match at {
        Some(raw) => Ok(raw
            .parse::<DateTime<Utc>>()
            .map_err(|e| format!("invalid --at time '{raw}': {e}"))?),
        None => Ok(Utc::now()),
    }
}

fn describe_window(window: &Window, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}  {:?}  {:.0} kcal (P{:.0}/C{:.0}/F{:.0})  [{:?}]",
        window.start_time.format("%H:%M"),
        window.end_time.format("%H:%M"),
        window.purpose,
        window.target_calories,
        window.target_macros.protein_g,
        window.target_macros.carbs_g,
        window.target_macros.fat_g,
        classify(window, now),
    )
}

fn describe_adjustment(rw: &RedistributedWindow) -> String {
    let reason = match rw.reason {
        RedistributionReason::None => String::new(),
        RedistributionReason::Overconsumption { percent_over } => {
            format!("  (over by {percent_over:.0}%)")
        }
        RedistributionReason::Underconsumption { percent_under } => {
            format!("  (under by {percent_under:.0}%)")
        }
    };
    format!(
        "{}-{}  {:.0} -> {:.0} kcal  (P{:.0}/C{:.0}/F{:.0}){}",
        rw.window.start_time.format("%H:%M"),
        rw.window.end_time.format("%H:%M"),
        rw.window.target_calories,
        rw.adjusted_calories,
        rw.adjusted_macros.protein_g,
        rw.adjusted_macros.carbs_g,
        rw.adjusted_macros.fat_g,
        reason,
    )
}
