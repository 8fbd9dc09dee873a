// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use acogo_fitness::error::AppError;
use acogo_fitness::models::{MeasurementInput, MeasurementUnit, WeightInput};
use chrono::Duration;
use std::collections::BTreeMap;

mod common;
use common::{create_test_app, day, meal, noon, workout};

#[tokio::test]
async fn test_daily_summary_totals_one_utc_day() {
    let (_store, state) = create_test_app();
    let user = "alice";

    state.tracking.log_meal(meal(user, noon("2024-01-06"))).await.unwrap();
    state
        .tracking
        .log_meal(meal(user, noon("2024-01-06") + Duration::hours(6)))
        .await
        .unwrap();
    // Previous and next day are excluded
    state.tracking.log_meal(meal(user, noon("2024-01-05"))).await.unwrap();
    state.tracking.log_meal(meal(user, noon("2024-01-07"))).await.unwrap();
    state
        .tracking
        .log_workout(workout(user, noon("2024-01-06")))
        .await
        .unwrap();

    let summary = state
        .tracking
        .get_daily_summary(user, day(2024, 1, 6))
        .await
        .unwrap();

    assert_eq!(summary.meals.len(), 2);
    assert_eq!(summary.workouts.len(), 1);
    assert_eq!(summary.total_calories, 1000.0);
    assert_eq!(summary.total_protein_grams, 60.0);
    assert_eq!(summary.total_carbs_grams, 80.0);
    assert_eq!(summary.total_fats_grams, 40.0);
    assert_eq!(summary.latest_weight_kg, None);
    assert!(summary.latest_measurement.is_none());
}

#[tokio::test]
async fn test_daily_summary_includes_latest_body_metrics() {
    let (_store, state) = create_test_app();
    let user = "alice";

    for (date, kg) in [("2024-01-01", 81.0), ("2024-01-03", 80.2)] {
        state
            .tracking
            .log_weight(WeightInput {
                user_id: user.to_string(),
                logged_at: noon(date),
                weight_kg: kg,
                source: "scale".to_string(),
                note: None,
            })
            .await
            .unwrap();
    }
    state
        .tracking
        .log_measurement(MeasurementInput {
            user_id: user.to_string(),
            logged_at: noon("2024-01-02"),
            unit: MeasurementUnit::In,
            values: BTreeMap::from([("waist".to_string(), 32.0)]),
        })
        .await
        .unwrap();

    let summary = state
        .tracking
        .get_daily_summary(user, day(2024, 1, 6))
        .await
        .unwrap();

    assert_eq!(summary.latest_weight_kg, Some(80.2));
    let measurement = summary.latest_measurement.expect("measurement logged");
    assert_eq!(measurement.unit, MeasurementUnit::In);
    assert_eq!(measurement.values.get("waist"), Some(&32.0));
}

#[tokio::test]
async fn test_invalid_meal_is_not_stored() {
    let (_store, state) = create_test_app();
    let mut bad = meal("alice", noon("2024-01-06"));
    bad.name = String::new();

    let result = state.tracking.log_meal(bad).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let summary = state
        .tracking
        .get_daily_summary("alice", day(2024, 1, 6))
        .await
        .unwrap();
    assert!(summary.meals.is_empty());
}

#[tokio::test]
async fn test_workout_requires_exercises() {
    let (_store, state) = create_test_app();
    let mut bad = workout("alice", noon("2024-01-06"));
    bad.exercises.clear();

    let result = state.tracking.log_workout(bad).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_weight_trend_default_range() {
    let (_store, state) = create_test_app();
    let start = noon("2024-01-01");
    for i in 0..3 {
        state
            .tracking
            .log_weight(WeightInput {
                user_id: "alice".to_string(),
                logged_at: start + Duration::days(i),
                weight_kg: 70.0 + i as f64,
                source: "manual".to_string(),
                note: None,
            })
            .await
            .unwrap();
    }

    let trend = state
        .tracking
        .get_weight_trend("alice", start, start + Duration::days(1), None)
        .await
        .unwrap();

    let kgs: Vec<f64> = trend.iter().map(|w| w.weight_kg).collect();
    assert_eq!(kgs, vec![70.0, 71.0]);
}
