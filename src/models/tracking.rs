// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged meals, workouts, weights and body measurements.
//!
//! Each log type has an `*Input` struct (validated before it reaches the
//! store) and a stored record carrying the store-assigned id and `created_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

// ─── Meals ───────────────────────────────────────────────────

/// Meal log request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub protein_grams: f64,
    #[validate(range(min = 0.0))]
    pub carbs_grams: f64,
    #[validate(range(min = 0.0))]
    pub fats_grams: f64,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Stored meal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub id: String,
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    pub name: String,
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ─── Workouts ────────────────────────────────────────────────

/// How hard a workout felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerceivedIntensity {
    Easy,
    Moderate,
    Hard,
}

/// A single set within an exercise. All quantities are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub reps: u32,
    #[validate(range(min = 0.0))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.0))]
    pub distance_km: Option<f64>,
    #[validate(range(min = 0.0))]
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Exercise {
    #[validate(length(min = 1, message = "exercise name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "exercise needs at least one set"), nested)]
    pub sets: Vec<ExerciseSet>,
}

/// Workout log request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(exclusive_min = 0.0))]
    pub duration_minutes: Option<f64>,
    pub perceived_intensity: Option<PerceivedIntensity>,
    #[validate(length(min = 1, message = "workout needs at least one exercise"), nested)]
    pub exercises: Vec<Exercise>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Stored workout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: String,
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    pub title: String,
    pub duration_minutes: Option<f64>,
    pub perceived_intensity: Option<PerceivedIntensity>,
    pub exercises: Vec<Exercise>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ─── Weight ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeightInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    #[validate(range(exclusive_min = 0.0))]
    pub weight_kg: f64,
    /// Where the reading came from (e.g. "manual", "scale")
    #[validate(length(min = 1, message = "source is required"))]
    pub source: String,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub id: String,
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    pub weight_kg: f64,
    pub source: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ─── Measurements ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    #[default]
    Cm,
    In,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    #[serde(default)]
    pub unit: MeasurementUnit,
    /// Body-part name to measured value, e.g. `{"waist": 81.5}`
    #[validate(custom(function = "validate_measurement_values"))]
    pub values: BTreeMap<String, f64>,
}

fn validate_measurement_values(
    values: &BTreeMap<String, f64>,
) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::new("empty")
            .with_message("At least one measurement is required.".into()));
    }
    if values.values().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ValidationError::new("negative")
            .with_message("Measurements must be non-negative numbers.".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementEntry {
    pub id: String,
    pub user_id: String,
    pub logged_at: DateTime<Utc>,
    pub unit: MeasurementUnit,
    pub values: BTreeMap<String, f64>,
    pub created_at: DateTime<Utc>,
}

// ─── Daily Summary ───────────────────────────────────────────

/// Everything a user logged on one UTC day, plus their latest body metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub user_id: String,
    pub day: NaiveDate,
    pub total_calories: f64,
    pub total_protein_grams: f64,
    pub total_carbs_grams: f64,
    pub total_fats_grams: f64,
    pub meals: Vec<MealLog>,
    pub workouts: Vec<WorkoutEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_measurement: Option<MeasurementEntry>,
}
