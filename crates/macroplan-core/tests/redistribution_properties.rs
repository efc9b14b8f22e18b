//! Property tests for the redistribution engine.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use macroplan_core::{
    classify, redistribute, LoggedEntry, MacroTargets, PrimaryGoal, Profile, Window,
    WindowPurpose, WindowState,
};

fn base() -> DateTime<Utc> {
    "2025-06-02T12:00:00Z".parse().unwrap()
}

fn arb_purpose() -> impl Strategy<Value = WindowPurpose> {
    prop_oneof![
        Just(WindowPurpose::SustainedEnergy),
        Just(WindowPurpose::FocusBoost),
        Just(WindowPurpose::Recovery),
        Just(WindowPurpose::Preworkout),
        Just(WindowPurpose::Postworkout),
        Just(WindowPurpose::MetabolicBoost),
        Just(WindowPurpose::SleepOptimization),
    ]
}

fn arb_plain_purpose() -> impl Strategy<Value = WindowPurpose> {
    // Purposes without post-reconciliation macro minimums.
    prop_oneof![
        Just(WindowPurpose::SustainedEnergy),
        Just(WindowPurpose::Recovery),
        Just(WindowPurpose::MetabolicBoost),
        Just(WindowPurpose::SleepOptimization),
    ]
}

fn arb_goal() -> impl Strategy<Value = PrimaryGoal> {
    prop_oneof![
        Just(PrimaryGoal::WeightLoss),
        Just(PrimaryGoal::MuscleBuild),
        Just(PrimaryGoal::ImproveEnergy),
        Just(PrimaryGoal::Maintain),
    ]
}

fn window_from(
    offset_min: i64,
    duration_min: i64,
    purpose: WindowPurpose,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> Window {
    Window::new(
        base() + Duration::minutes(offset_min),
        base() + Duration::minutes(offset_min + duration_min),
        purpose,
        calories,
        MacroTargets::new(protein, carbs, fat),
    )
}

fn arb_window(purpose: impl Strategy<Value = WindowPurpose>) -> impl Strategy<Value = Window> {
    (
        -600i64..600,
        30i64..180,
        purpose,
        100.0f64..1000.0,
        5.0f64..80.0,
        5.0f64..100.0,
        2.0f64..40.0,
    )
        .prop_map(|(off, dur, purpose, cal, p, c, f)| {
            window_from(off, dur, purpose, cal, p, c, f)
        })
}

fn arb_entry() -> impl Strategy<Value = LoggedEntry> {
    (50.0f64..900.0, 0.0f64..60.0, 0.0f64..90.0, 0.0f64..40.0).prop_map(|(cal, p, c, f)| {
        LoggedEntry::new(base() - Duration::hours(3), cal, p, c, f)
    })
}

fn profile_with(goal: PrimaryGoal) -> Profile {
    Profile::new(2200.0, 160.0, 220.0, 70.0, goal)
}

proptest! {
    #[test]
    fn one_output_per_input_in_order(
        windows in prop::collection::vec(arb_window(arb_purpose()), 0..8),
        entries in prop::collection::vec(arb_entry(), 0..6),
        goal in arb_goal(),
    ) {
        let out = redistribute(&windows, &entries, &profile_with(goal), base());
        prop_assert_eq!(out.len(), windows.len());
        for (w, rw) in windows.iter().zip(&out) {
            prop_assert_eq!(&w.id, &rw.window.id);
        }
    }

    #[test]
    fn identical_inputs_yield_identical_outputs(
        windows in prop::collection::vec(arb_window(arb_purpose()), 0..8),
        entries in prop::collection::vec(arb_entry(), 0..6),
        goal in arb_goal(),
    ) {
        let profile = profile_with(goal);
        let a = redistribute(&windows, &entries, &profile, base());
        let b = redistribute(&windows, &entries, &profile, base());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.adjusted_calories, y.adjusted_calories);
            prop_assert_eq!(x.adjusted_macros, y.adjusted_macros);
            prop_assert_eq!(x.reason, y.reason);
        }
    }

    #[test]
    fn past_and_active_windows_are_never_altered(
        windows in prop::collection::vec(arb_window(arb_purpose()), 1..8),
        entries in prop::collection::vec(arb_entry(), 0..6),
        goal in arb_goal(),
    ) {
        let out = redistribute(&windows, &entries, &profile_with(goal), base());
        for (w, rw) in windows.iter().zip(&out) {
            if classify(w, base()) != WindowState::Upcoming {
                prop_assert_eq!(rw.adjusted_calories, w.target_calories);
                prop_assert_eq!(rw.adjusted_macros, w.target_macros);
            }
        }
    }

    #[test]
    fn weight_loss_never_drops_below_the_floor(
        windows in prop::collection::vec(arb_window(arb_purpose()), 1..8),
        entries in prop::collection::vec(arb_entry(), 0..6),
    ) {
        let out = redistribute(&windows, &entries, &profile_with(PrimaryGoal::WeightLoss), base());
        for rw in out.iter().filter(|rw| classify(&rw.window, base()) == WindowState::Upcoming) {
            prop_assert!(rw.adjusted_calories >= 200.0);
        }
    }

    #[test]
    fn muscle_build_never_exceeds_the_ceiling(
        windows in prop::collection::vec(arb_window(arb_purpose()), 1..8),
        entries in prop::collection::vec(arb_entry(), 0..6),
    ) {
        let out = redistribute(&windows, &entries, &profile_with(PrimaryGoal::MuscleBuild), base());
        for rw in out.iter().filter(|rw| classify(&rw.window, base()) == WindowState::Upcoming) {
            prop_assert!(rw.adjusted_calories <= rw.window.target_calories * 1.5 + 1e-9);
        }
    }

    #[test]
    fn reconciliation_tolerance_holds_without_purpose_minimums(
        windows in prop::collection::vec(arb_window(arb_plain_purpose()), 1..8),
        entries in prop::collection::vec(arb_entry(), 0..6),
    ) {
        let out = redistribute(&windows, &entries, &profile_with(PrimaryGoal::Maintain), base());
        for rw in out.iter().filter(|rw| classify(&rw.window, base()) == WindowState::Upcoming) {
            let implied = rw.adjusted_macros.implied_calories();
            prop_assert!(
                (implied - rw.adjusted_calories).abs() <= 50.0 + 1e-6,
                "implied {} vs adjusted {}",
                implied,
                rw.adjusted_calories
            );
        }
    }
}
