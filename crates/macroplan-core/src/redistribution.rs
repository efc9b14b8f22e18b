//! Redistribution engine.
//!
//! Recomputes the remaining (upcoming) windows' calorie and macro targets
//! as actual consumption and elapsed time diverge from the original plan:
//! - Proportional split of whatever remains of the daily targets
//! - Goal-specific calorie bounds and protein/carb floors
//! - Macro-to-calorie reconciliation with a tolerance band
//!
//! The engine is a pure function over explicit arguments. It holds no state,
//! touches no clock or storage, and never panics on any input -- degenerate
//! totals fall back to pass-through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::{
    classify, ConsumedTotals, LoggedEntry, MacroTargets, PrimaryGoal, Profile, Window,
    WindowPurpose, WindowState,
};

/// Over/under-consumption trigger threshold, in percent of upcoming total.
const REASON_THRESHOLD_PCT: f64 = 20.0;
/// Minimum calories any floored window may drop to.
const CALORIE_FLOOR: f64 = 200.0;
/// Muscle-build ceiling as a factor of the original window target.
const MUSCLE_BUILD_CEILING_FACTOR: f64 = 1.5;
/// Default-goal ceiling as a factor of the original window target.
const DEFAULT_CEILING_FACTOR: f64 = 1.3;
/// Weight-loss protein floor as a factor of the original window protein.
const WEIGHT_LOSS_PROTEIN_FACTOR: f64 = 0.8;
/// Accepted gap between implied macro calories and adjusted calories.
const RECONCILE_TOLERANCE_KCAL: f64 = 50.0;

const PREWORKOUT_MIN_CARBS_G: f64 = 30.0;
const POSTWORKOUT_MIN_PROTEIN_G: f64 = 30.0;
const FOCUS_BOOST_MIN_FAT_G: f64 = 10.0;

/// Why a pass adjusted the upcoming windows.
///
/// This is a day-level signal: one reason is computed per pass and stamped
/// onto every upcoming window in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RedistributionReason {
    #[default]
    None,
    Overconsumption { percent_over: f64 },
    Underconsumption { percent_under: f64 },
}

/// One window with its adjusted targets after a redistribution pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedistributedWindow {
    pub window: Window,
    pub adjusted_calories: f64,
    pub adjusted_macros: MacroTargets,
    pub reason: RedistributionReason,
}

impl RedistributedWindow {
    fn pass_through(window: &Window) -> Self {
        Self {
            window: window.clone(),
            adjusted_calories: window.target_calories,
            adjusted_macros: window.target_macros,
            reason: RedistributionReason::None,
        }
    }

    /// True when this pass left the window's targets untouched.
    pub fn is_unchanged(&self) -> bool {
        self.adjusted_calories == self.window.target_calories
            && self.adjusted_macros == self.window.target_macros
    }
}

/// Original-target sums over the upcoming windows.
#[derive(Debug, Clone, Copy, Default)]
struct UpcomingTotals {
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

impl UpcomingTotals {
    fn from_windows<'a>(upcoming: impl Iterator<Item = &'a Window>) -> Self {
        upcoming.fold(Self::default(), |mut acc, w| {
            acc.calories += w.target_calories;
            acc.protein_g += w.target_macros.protein_g;
            acc.carbs_g += w.target_macros.carbs_g;
            acc.fat_g += w.target_macros.fat_g;
            acc
        })
    }
}

/// What remains of the daily targets after everything logged so far.
/// Any axis may be negative once the user has overshot it.
#[derive(Debug, Clone, Copy)]
struct Remaining {
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

impl Remaining {
    fn compute(profile: &Profile, consumed: &ConsumedTotals) -> Self {
        Self {
            calories: profile.daily_calorie_target - consumed.calories,
            protein_g: profile.daily_protein_target - consumed.protein_g,
            carbs_g: profile.daily_carb_target - consumed.carbs_g,
            fat_g: profile.daily_fat_target - consumed.fat_g,
        }
    }
}

/// Recompute upcoming windows' targets from consumption-to-date.
///
/// Past and active windows pass through with their original targets and
/// reason `None`; only upcoming windows are adjusted. Output preserves
/// input order, one entry per input window.
pub fn redistribute(
    windows: &[Window],
    entries: &[LoggedEntry],
    profile: &Profile,
    now: DateTime<Utc>,
) -> Vec<RedistributedWindow> {
    let consumed = ConsumedTotals::from_entries(entries);
    let remaining = Remaining::compute(profile, &consumed);

    let totals = UpcomingTotals::from_windows(
        windows
            .iter()
            .filter(|w| classify(w, now) == WindowState::Upcoming),
    );

    // No upcoming windows, or a degenerate zero-calorie upcoming total:
    // nothing to redistribute over, so every window passes through.
    if totals.calories == 0.0 {
        return windows.iter().map(RedistributedWindow::pass_through).collect();
    }

    let reason = day_level_reason(remaining.calories, totals.calories);

    windows
        .iter()
        .map(|w| {
            if classify(w, now) != WindowState::Upcoming {
                return RedistributedWindow::pass_through(w);
            }
            adjust_window(w, &remaining, &totals, profile.primary_goal, reason)
        })
        .collect()
}

/// One over/under-consumption verdict for the whole pass.
fn day_level_reason(remaining_calories: f64, total_upcoming_calories: f64) -> RedistributionReason {
    let pct_diff = (remaining_calories - total_upcoming_calories) * 100.0 / total_upcoming_calories;
    if pct_diff < -REASON_THRESHOLD_PCT {
        RedistributionReason::Overconsumption {
            percent_over: pct_diff.abs(),
        }
    } else if pct_diff > REASON_THRESHOLD_PCT {
        RedistributionReason::Underconsumption {
            percent_under: pct_diff,
        }
    } else {
        RedistributionReason::None
    }
}

/// This axis' share of what remains, proportional to the window's share of
/// the upcoming total on the same axis. A zero total yields a zero share;
/// goal and purpose floors below may restore it.
fn proportional_share(remaining: f64, window_target: f64, upcoming_total: f64) -> f64 {
    if upcoming_total == 0.0 {
        0.0
    } else {
        remaining * window_target / upcoming_total
    }
}

fn adjust_window(
    window: &Window,
    remaining: &Remaining,
    totals: &UpcomingTotals,
    goal: PrimaryGoal,
    reason: RedistributionReason,
) -> RedistributedWindow {
    let mut calories =
        proportional_share(remaining.calories, window.target_calories, totals.calories);
    let mut macros = MacroTargets {
        protein_g: proportional_share(
            remaining.protein_g,
            window.target_macros.protein_g,
            totals.protein_g,
        ),
        carbs_g: proportional_share(
            remaining.carbs_g,
            window.target_macros.carbs_g,
            totals.carbs_g,
        ),
        fat_g: proportional_share(remaining.fat_g, window.target_macros.fat_g, totals.fat_g),
    };

    apply_goal_bounds(window, goal, &mut calories, &mut macros);
    reconcile_macros(window, calories, &mut macros);

    RedistributedWindow {
        window: window.clone(),
        adjusted_calories: calories,
        adjusted_macros: macros,
        reason,
    }
}

/// Goal-specific calorie bounds and macro floors. Floors always win over a
/// low or negative raw share.
fn apply_goal_bounds(
    window: &Window,
    goal: PrimaryGoal,
    calories: &mut f64,
    macros: &mut MacroTargets,
) {
    let original = &window.target_macros;
    match goal {
        PrimaryGoal::WeightLoss => {
            *calories = calories.max(CALORIE_FLOOR);
            macros.protein_g = macros
                .protein_g
                .max(original.protein_g * WEIGHT_LOSS_PROTEIN_FACTOR);
        }
        PrimaryGoal::MuscleBuild => {
            *calories = calories.min(window.target_calories * MUSCLE_BUILD_CEILING_FACTOR);
            macros.protein_g = macros.protein_g.max(original.protein_g);
        }
        PrimaryGoal::ImproveEnergy => match window.purpose {
            WindowPurpose::Preworkout => {
                macros.carbs_g = macros.carbs_g.max(original.carbs_g);
            }
            WindowPurpose::Postworkout => {
                macros.protein_g = macros.protein_g.max(original.protein_g);
            }
            _ => {}
        },
        PrimaryGoal::Maintain => {
            *calories = calories
                .max(CALORIE_FLOOR)
                .min(window.target_calories * DEFAULT_CEILING_FACTOR);
        }
    }
}

/// Scale macros back toward the adjusted calories when the implied calories
/// drift past the tolerance band.
///
/// Macros inside the band are accepted unchanged. Only the scaling branch
/// applies the purpose minimums afterwards, and those may reopen a small
/// gap; that gap is accepted rather than corrected again.
fn reconcile_macros(window: &Window, calories: f64, macros: &mut MacroTargets) {
    let implied = macros.implied_calories();
    if (implied - calories).abs() <= RECONCILE_TOLERANCE_KCAL || implied == 0.0 {
        return;
    }

    let scale = calories / implied;
    macros.protein_g *= scale;
    macros.carbs_g *= scale;
    macros.fat_g *= scale;

    match window.purpose {
        WindowPurpose::Preworkout => {
            macros.carbs_g = macros.carbs_g.max(PREWORKOUT_MIN_CARBS_G);
        }
        WindowPurpose::Postworkout => {
            macros.protein_g = macros.protein_g.max(POSTWORKOUT_MIN_PROTEIN_G);
        }
        WindowPurpose::FocusBoost => {
            macros.fat_g = macros.fat_g.max(FOCUS_BOOST_MIN_FAT_G);
        }
        _ => {}
    }
}
