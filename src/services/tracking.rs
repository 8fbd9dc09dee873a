// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal, workout and body-metric logging.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::db::TrackingStore;
use crate::error::{AppError, Result};
use crate::models::{
    DailySummary, MealInput, MealLog, MeasurementEntry, MeasurementInput, WeightEntry,
    WeightInput, WorkoutEntry, WorkoutInput,
};
use crate::time_utils::{end_of_utc_day, start_of_utc_day};

pub const DEFAULT_TREND_LIMIT: usize = 90;
pub const MAX_TREND_LIMIT: usize = 365;

#[derive(Clone)]
pub struct TrackingService {
    store: Arc<dyn TrackingStore>,
}

impl TrackingService {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        Self { store }
    }

    pub async fn log_meal(&self, meal: MealInput) -> Result<MealLog> {
        meal.validate()?;
        let logged = self.store.create_meal(&meal).await?;
        tracing::debug!(user_id = %logged.user_id, meal_id = %logged.id, "Meal logged");
        Ok(logged)
    }

    pub async fn log_workout(&self, workout: WorkoutInput) -> Result<WorkoutEntry> {
        workout.validate()?;
        let logged = self.store.create_workout(&workout).await?;
        tracing::debug!(
            user_id = %logged.user_id,
            workout_id = %logged.id,
            exercises = logged.exercises.len(),
            "Workout logged"
        );
        Ok(logged)
    }

    pub async fn log_weight(&self, weight: WeightInput) -> Result<WeightEntry> {
        weight.validate()?;
        let logged = self.store.create_weight(&weight).await?;
        tracing::debug!(user_id = %logged.user_id, weight_kg = logged.weight_kg, "Weight logged");
        Ok(logged)
    }

    pub async fn log_measurement(&self, measurement: MeasurementInput) -> Result<MeasurementEntry> {
        measurement.validate()?;
        let logged = self.store.create_measurement(&measurement).await?;
        tracing::debug!(
            user_id = %logged.user_id,
            values = logged.values.len(),
            "Measurement logged"
        );
        Ok(logged)
    }

    /// Meals and workouts logged on `day` (UTC) with totals and latest body metrics.
    pub async fn get_daily_summary(&self, user_id: &str, day: NaiveDate) -> Result<DailySummary> {
        require_user(user_id)?;

        let start = start_of_utc_day(day);
        let end = end_of_utc_day(day);

        let (meals, workouts, weights, measurements) = tokio::try_join!(
            self.store.list_meals_by_user_and_date(user_id, start, end),
            self.store.list_workouts_by_user_and_date(user_id, start, end),
            self.store.list_weights_for_user(user_id, 1),
            self.store.list_measurements_for_user(user_id, 1),
        )?;

        let mut summary = DailySummary {
            user_id: user_id.to_string(),
            day,
            total_calories: 0.0,
            total_protein_grams: 0.0,
            total_carbs_grams: 0.0,
            total_fats_grams: 0.0,
            meals: Vec::new(),
            workouts,
            latest_weight_kg: weights.first().map(|w| w.weight_kg),
            latest_measurement: measurements.into_iter().next(),
        };
        for meal in &meals {
            summary.total_calories += meal.calories;
            summary.total_protein_grams += meal.protein_grams;
            summary.total_carbs_grams += meal.carbs_grams;
            summary.total_fats_grams += meal.fats_grams;
        }
        summary.meals = meals;

        Ok(summary)
    }

    /// Weights logged in `[start, end]`, oldest first, keeping the most recent
    /// `limit` entries.
    pub async fn get_weight_trend(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<WeightEntry>> {
        require_user(user_id)?;
        if start > end {
            return Err(AppError::Validation(
                "Start date must be before end date.".to_string(),
            ));
        }
        let limit = limit.unwrap_or(DEFAULT_TREND_LIMIT);
        if !(1..=MAX_TREND_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_TREND_LIMIT
            )));
        }

        let mut history = self.store.list_weight_history(user_id, start, end).await?;
        let skip = history.len().saturating_sub(limit);
        Ok(history.split_off(skip))
    }
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("userId is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn service() -> TrackingService {
        TrackingService::new(Arc::new(MemoryStore::new()))
    }

    fn weight(user_id: &str, logged_at: DateTime<Utc>, kg: f64) -> WeightInput {
        WeightInput {
            user_id: user_id.to_string(),
            logged_at,
            weight_kg: kg,
            source: "manual".to_string(),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_weight_trend_keeps_latest_entries_ascending() {
        let service = service();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
        for i in 0..5 {
            service
                .log_weight(weight("alice", base + Duration::days(i), 80.0 - i as f64))
                .await
                .unwrap();
        }

        let trend = service
            .get_weight_trend("alice", base, base + Duration::days(10), Some(3))
            .await
            .unwrap();

        let kgs: Vec<f64> = trend.iter().map(|w| w.weight_kg).collect();
        assert_eq!(kgs, vec![78.0, 77.0, 76.0]);
    }

    #[tokio::test]
    async fn test_weight_trend_rejects_inverted_range() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let result = service()
            .get_weight_trend("alice", start, start - Duration::days(1), None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_weight_trend_limit_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(30);
        let service = service();

        for limit in [0, MAX_TREND_LIMIT + 1] {
            let result = service
                .get_weight_trend("alice", start, end, Some(limit))
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))), "{}", limit);
        }
        assert!(service
            .get_weight_trend("alice", start, end, Some(MAX_TREND_LIMIT))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_log_weight_rejects_non_positive() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
        let result = service().log_weight(weight("alice", at, 0.0)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
