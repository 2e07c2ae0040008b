use super::types::{
    MAX_AGE, MIN_AGE, Projection, RETIREMENT_AGE, Scenario, TargetAges, Timeframe, WEEKS_PER_YEAR,
};

/// Weekly rate equivalent to the scenario's annual return under weekly
/// compounding: `(1 + annual)^(1/52) - 1`.
pub fn weekly_rate(scenario: Scenario) -> f64 {
    (1.0 + scenario.annual_rate()).powf(1.0 / WEEKS_PER_YEAR as f64) - 1.0
}

/// Future value of a weekly annuity after `years` of contributions, rounded to
/// the nearest whole dollar. `years = 0` contributes nothing and yields 0.
pub fn project(weekly_amount: f64, years: u32, scenario: Scenario) -> i64 {
    let rate = weekly_rate(scenario);
    let weeks = (years * WEEKS_PER_YEAR) as f64;
    let future_value = weekly_amount * (((1.0 + rate).powf(weeks) - 1.0) / rate);
    future_value.round() as i64
}

/// Projection from `age` to `target_age`, with the contributed-principal
/// breakdown shown alongside the headline value.
pub fn project_to_age(
    age: u32,
    target_age: u32,
    weekly_amount: u32,
    scenario: Scenario,
) -> Projection {
    let years = target_age.saturating_sub(age);
    Projection {
        target_age,
        years,
        final_value: project(weekly_amount as f64, years, scenario),
        total_contributed: (weekly_amount * WEEKS_PER_YEAR * years) as i64,
    }
}

/// Target ages for the three selectable horizons. Short lands roughly a
/// quarter of the way to 65 (at least 3 years out), medium a bit past halfway,
/// long is always 65. Raw spans can overshoot for ages near 65, so the result
/// is clamped non-decreasing: short <= medium <= long for every supported age.
pub fn derive_target_ages(age: u32) -> TargetAges {
    let years_until_target = RETIREMENT_AGE.saturating_sub(age) as f64;

    let short_span = (years_until_target * 0.25).round().max(3.0) as u32;
    let medium_span = (years_until_target * 0.55).round() as u32;

    let long = RETIREMENT_AGE;
    let medium = (age + medium_span).min(long);
    let short = (age + short_span).min(medium);

    TargetAges {
        short,
        medium,
        long,
    }
}

/// Clamp a submitted age into the supported band.
pub fn clamp_age(age: u32) -> u32 {
    age.clamp(MIN_AGE, MAX_AGE)
}

pub fn projection_for_timeframe(
    age: u32,
    target_ages: &TargetAges,
    timeframe: Timeframe,
    weekly_amount: u32,
    scenario: Scenario,
) -> Projection {
    project_to_age(
        age,
        target_ages.for_timeframe(timeframe),
        weekly_amount,
        scenario,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn zero_years_projects_zero_for_every_scenario() {
        for scenario in [Scenario::Low, Scenario::Normal, Scenario::High] {
            assert_eq!(project(25.0, 0, scenario), 0);
        }
    }

    #[test]
    fn projection_matches_closed_form_formula_exactly() {
        // age 25, $25/week, normal scenario, to 65: 40 years, 2080 weeks.
        let rate = 1.12_f64.powf(1.0 / 52.0) - 1.0;
        let expected = (25.0 * ((1.0 + rate).powf(2080.0) - 1.0) / rate).round() as i64;

        let actual = project(25.0, 40, Scenario::Normal);
        assert_eq!(actual, expected);
        assert!((1_000_000..1_100_000).contains(&actual), "got {actual}");
    }

    #[test]
    fn project_to_age_reports_contributions_and_years() {
        let projection = project_to_age(25, 65, 25, Scenario::Normal);
        assert_eq!(projection.years, 40);
        assert_eq!(projection.total_contributed, 25 * 52 * 40);
        assert!(projection.final_value > projection.total_contributed);
    }

    #[test]
    fn target_age_at_or_past_current_age_yields_zero_value() {
        let projection = project_to_age(64, 64, 100, Scenario::High);
        assert_eq!(projection.years, 0);
        assert_eq!(projection.final_value, 0);
        assert_eq!(projection.total_contributed, 0);
    }

    #[test]
    fn derives_documented_targets_for_age_25() {
        let targets = derive_target_ages(25);
        assert_eq!(targets.short, 35); // 25 + max(3, round(40 * 0.25))
        assert_eq!(targets.medium, 47); // 25 + round(40 * 0.55)
        assert_eq!(targets.long, 65);
    }

    #[test]
    fn near_retirement_targets_collapse_toward_65_without_overshoot() {
        let targets = derive_target_ages(63);
        assert!(targets.short <= targets.medium);
        assert!(targets.medium <= targets.long);
        assert_eq!(targets.long, 65);
    }

    #[test]
    fn targets_are_ordered_for_every_supported_age() {
        for age in MIN_AGE..=MAX_AGE {
            let targets = derive_target_ages(age);
            assert!(
                targets.short <= targets.medium && targets.medium <= targets.long,
                "age {age}: {targets:?}"
            );
            assert_eq!(targets.long, RETIREMENT_AGE);
            assert!(targets.short > age || age >= RETIREMENT_AGE - 3);
        }
    }

    #[test]
    fn clamp_age_pins_out_of_band_values() {
        assert_eq!(clamp_age(12), MIN_AGE);
        assert_eq!(clamp_age(80), MAX_AGE);
        assert_eq!(clamp_age(40), 40);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_projection_is_monotone_in_years(
            amount in 10u32..=2000,
            years in 0u32..60
        ) {
            for scenario in [Scenario::Low, Scenario::Normal, Scenario::High] {
                let shorter = project(amount as f64, years, scenario);
                let longer = project(amount as f64, years + 1, scenario);
                prop_assert!(longer >= shorter);
            }
        }

        #[test]
        fn prop_projection_is_monotone_in_amount(
            amount in 10u32..2000,
            years in 1u32..=60
        ) {
            let smaller = project(amount as f64, years, Scenario::Normal);
            let larger = project((amount + 5) as f64, years, Scenario::Normal);
            prop_assert!(larger >= smaller);
        }

        #[test]
        fn prop_scenarios_are_ordered(
            amount in 10u32..=2000,
            years in 1u32..=60
        ) {
            let low = project(amount as f64, years, Scenario::Low);
            let normal = project(amount as f64, years, Scenario::Normal);
            let high = project(amount as f64, years, Scenario::High);
            prop_assert!(high >= normal);
            prop_assert!(normal >= low);
        }

        #[test]
        fn prop_projection_never_loses_principal(
            amount in 10u32..=2000,
            years in 0u32..=60
        ) {
            let projection = project_to_age(0, years, amount, Scenario::Low);
            prop_assert!(projection.final_value >= projection.total_contributed);
        }
    }
}
