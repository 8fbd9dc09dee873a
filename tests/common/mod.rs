// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use acogo_fitness::config::Config;
use acogo_fitness::db::MemoryStore;
use acogo_fitness::models::{
    Exercise, ExerciseSet, MealInput, PostPrivacy, PublishPostInput, WorkoutInput,
};
use acogo_fitness::AppState;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

/// Create a test app over a fresh in-memory store.
/// Returns the store (for seeding the friend graph) and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Arc<MemoryStore>, AppState) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(Config::default(), store.clone());
    (store, state)
}

#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Noon UTC on the given `YYYY-MM-DD` day.
#[allow(dead_code)]
pub fn noon(date: &str) -> DateTime<Utc> {
    let date: NaiveDate = date.parse().expect("valid test date");
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"))
}

#[allow(dead_code)]
pub fn meal(user_id: &str, logged_at: DateTime<Utc>) -> MealInput {
    MealInput {
        user_id: user_id.to_string(),
        logged_at,
        name: "Meal".to_string(),
        calories: 500.0,
        protein_grams: 30.0,
        carbs_grams: 40.0,
        fats_grams: 20.0,
        notes: None,
    }
}

#[allow(dead_code)]
pub fn workout(user_id: &str, logged_at: DateTime<Utc>) -> WorkoutInput {
    WorkoutInput {
        user_id: user_id.to_string(),
        logged_at,
        title: "Morning run".to_string(),
        duration_minutes: Some(30.0),
        perceived_intensity: None,
        exercises: vec![Exercise {
            name: "Run".to_string(),
            sets: vec![ExerciseSet {
                reps: 1,
                weight_kg: None,
                distance_km: Some(5.0),
                duration_seconds: Some(1800.0),
            }],
        }],
        notes: None,
    }
}

/// Log a meal at noon UTC on each `YYYY-MM-DD` day.
#[allow(dead_code)]
pub async fn log_meals(state: &AppState, user_id: &str, days: &[&str]) {
    for date in days {
        state
            .tracking
            .log_meal(meal(user_id, noon(date)))
            .await
            .expect("Failed to log meal");
    }
}

#[allow(dead_code)]
pub fn post(author_id: &str, content: &str, privacy: PostPrivacy) -> PublishPostInput {
    PublishPostInput {
        author_id: author_id.to_string(),
        content: content.to_string(),
        privacy: Some(privacy),
        ..Default::default()
    }
}
