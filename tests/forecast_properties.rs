//! Property-based and scenario tests for the forecasting engine.
//!
//! 1. Resampling a single-value sample repeats that value
//! 2. Percentile reports are non-decreasing in both modes
//! 3. Identical seed, sample and iterations give identical reports, and a
//!    fixed seed reproduces recorded reference outcomes
//! 4. Statistics are idempotent and never reorder the sample
//! 5. Reference scenarios

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use throughput_forecasts::domain::throughput_sample::{ThroughputSample, ValidationError};
use throughput_forecasts::services::forecast::{
    compute_statistics, forecast_items_for_period_count_with_rng,
    forecast_periods_for_item_count, forecast_periods_for_item_count_with_rng,
};
use throughput_forecasts::services::percentiles::{PERCENTILES, PercentileReport, summarize};
use throughput_forecasts::services::resampler::resample;
use throughput_forecasts::services::simulation::{
    ForecastRequest, SimulationError, simulate_with_rng,
};

fn arb_sample() -> impl Strategy<Value = ThroughputSample> {
    prop::collection::vec(0.0f64..=20.0, 1..=30)
        .prop_filter("mean throughput of at least one item", |values| {
            values.iter().sum::<f64>() / values.len() as f64 >= 1.0
        })
        .prop_map(|values| ThroughputSample::new(values).unwrap())
}

fn assert_non_decreasing(report: &PercentileReport) -> Result<(), TestCaseError> {
    for pair in report.entries().windows(2) {
        prop_assert!(
            pair[0].value <= pair[1].value,
            "P{} = {} > P{} = {}",
            pair[0].percentile,
            pair[0].value,
            pair[1].percentile,
            pair[1].value
        );
    }
    Ok(())
}

// Single-value samples

proptest! {
    #[test]
    fn single_value_resampling_is_constant(
        value in 0.0f64..=1000.0,
        count in 0usize..=200,
        seed in any::<u64>(),
    ) {
        let sample = ThroughputSample::new(vec![value]).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(resample(&sample, count, &mut rng), vec![value; count]);
    }
}

// Monotone percentile reports

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn items_to_periods_report_is_monotone(
        sample in arb_sample(),
        item_count in 1u64..=60,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            forecast_periods_for_item_count_with_rng(&sample, item_count, 300, &mut rng).unwrap();
        prop_assert_eq!(report.entries().len(), PERCENTILES.len());
        assert_non_decreasing(&report)?;
    }

    #[test]
    fn periods_to_items_report_is_monotone(
        sample in arb_sample(),
        period_count in 0.5f64..=26.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            forecast_items_for_period_count_with_rng(&sample, period_count, 300, &mut rng).unwrap();
        prop_assert_eq!(report.entries().len(), PERCENTILES.len());
        assert_non_decreasing(&report)?;
    }
}

// Determinism under a fixed seed

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_gives_same_report(
        sample in arb_sample(),
        item_count in 1u64..=40,
        seed in any::<u64>(),
    ) {
        let first = forecast_periods_for_item_count_with_rng(
            &sample, item_count, 200, &mut StdRng::seed_from_u64(seed),
        ).unwrap();
        let second = forecast_periods_for_item_count_with_rng(
            &sample, item_count, 200, &mut StdRng::seed_from_u64(seed),
        ).unwrap();
        prop_assert_eq!(first, second);
    }
}

fn percentile_values(report: &PercentileReport) -> Vec<f64> {
    report.entries().iter().map(|entry| entry.value).collect()
}

#[test]
fn seeded_items_to_periods_matches_recorded_outcomes() {
    let sample = ThroughputSample::new(vec![2.0, 3.0, 5.0, 2.0, 4.0, 6.0]).unwrap();
    let request = ForecastRequest::TargetItemCount { item_count: 10 };

    let outcome =
        simulate_with_rng(&sample, request, 1000, &mut StdRng::seed_from_u64(2026)).unwrap();
    assert_eq!(
        outcome.values[..8],
        [3.0, 4.0, 4.0, 2.0, 3.0, 2.0, 4.0, 3.0]
    );

    let report = forecast_periods_for_item_count_with_rng(
        &sample,
        10,
        1000,
        &mut StdRng::seed_from_u64(2026),
    )
    .unwrap();
    assert_eq!(percentile_values(&report), vec![3.0, 4.0, 4.0, 4.0, 5.0]);
}

#[test]
fn seeded_periods_to_items_matches_recorded_outcomes() {
    let sample = ThroughputSample::new(vec![2.0, 3.0, 5.0, 2.0, 4.0, 6.0]).unwrap();
    let request = ForecastRequest::TargetPeriod { period_count: 2.5 };

    let outcome =
        simulate_with_rng(&sample, request, 1000, &mut StdRng::seed_from_u64(2026)).unwrap();
    assert_eq!(
        outcome.values[..8],
        [9.0, 6.5, 8.0, 11.0, 12.0, 11.0, 8.0, 9.0]
    );

    let report = forecast_items_for_period_count_with_rng(
        &sample,
        2.5,
        1000,
        &mut StdRng::seed_from_u64(2026),
    )
    .unwrap();
    assert_eq!(percentile_values(&report), vec![10.5, 11.0, 12.0, 12.5, 13.5]);
}

// Statistics are idempotent

proptest! {
    #[test]
    fn statistics_are_idempotent(values in prop::collection::vec(0.0f64..=50.0, 1..=40)) {
        let sample = ThroughputSample::new(values.clone()).unwrap();
        let first = compute_statistics(&sample);
        let second = compute_statistics(&sample);
        prop_assert_eq!(first, second);
        prop_assert_eq!(sample.values(), values.as_slice());
        prop_assert!(first.min <= first.median && first.median <= first.max);
        prop_assert!(first.min - 1e-9 <= first.mean && first.mean <= first.max + 1e-9);
        prop_assert_eq!(first.count, values.len());
    }
}

// Scenarios

#[test]
fn scenario_items_to_periods_over_mixed_sample() {
    let sample = ThroughputSample::new(vec![2.0, 3.0, 5.0, 2.0, 4.0, 6.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(2026);
    let outcome = simulate_with_rng(
        &sample,
        ForecastRequest::TargetItemCount { item_count: 10 },
        5000,
        &mut rng,
    )
    .unwrap();

    assert!(outcome.values.iter().all(|v| *v >= 1.0 && v.fract() == 0.0));
    let report = summarize(&outcome);
    assert!(report.get(98).unwrap() >= report.get(70).unwrap());
}

#[test]
fn scenario_all_zero_sample_does_not_converge() {
    let sample = ThroughputSample::new(vec![0.0, 0.0, 0.0]).unwrap();
    let error = forecast_periods_for_item_count(&sample, 1, 5000).unwrap_err();
    assert!(matches!(error, SimulationError::NonConvergence { item_count: 1, .. }));
}

#[test]
fn scenario_constant_sample_over_three_periods() {
    let sample = ThroughputSample::new(vec![5.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let outcome = simulate_with_rng(
        &sample,
        ForecastRequest::TargetPeriod { period_count: 3.0 },
        5000,
        &mut rng,
    )
    .unwrap();

    assert!(outcome.values.iter().all(|v| *v == 15.0));
    let report = summarize(&outcome);
    for percentile in PERCENTILES {
        assert_eq!(report.get(percentile), Some(15.0));
    }
}

#[test]
fn scenario_statistics_of_mixed_sample() {
    let sample = ThroughputSample::new(vec![2.0, 3.0, 5.0, 2.0, 4.0, 6.0]).unwrap();
    let stats = compute_statistics(&sample);

    assert!((stats.mean - 11.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.min, 2.0);
    assert_eq!(stats.max, 6.0);
    assert_eq!(stats.median, 3.5);
    assert_eq!(stats.count, 6);
}

#[test]
fn scenario_negative_value_is_rejected() {
    let error = ThroughputSample::new(vec![-1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(error, ValidationError::Negative { position: 0, .. }));
}
