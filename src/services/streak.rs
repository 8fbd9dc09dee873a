// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logging streaks and milestone celebrations.
//!
//! A summary is derived fresh from the user's activity days on every call:
//! 1. Fetch distinct activity days inside the lookback window
//! 2. Walk backward from today for the current streak
//! 3. Scan forward once for the longest run and first-reached milestones
//! 4. Build the 14-day calendar strip and the celebration prompt

use chrono::{Days, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use crate::db::TrackingStore;
use crate::error::{AppError, Result};
use crate::models::streak::CELEBRATED_TARGET_DAYS;
use crate::models::{
    RecentActivityDay, StreakCelebration, StreakGoalSummary, StreakQuery, StreakSummary,
    STREAK_GOALS,
};
use crate::time_utils::{add_days, end_of_utc_day, parse_reference_day, start_of_utc_day, utc_day};

/// Width of the recent-activity calendar strip.
pub const RECENT_ACTIVITY_WINDOW: u64 = 14;
/// Window size used when neither the query nor config sets one.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;
/// Largest accepted lookback window, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 730;

/// Computes streak summaries from a user's logged activity.
#[derive(Clone)]
pub struct StreakEngine {
    store: Arc<dyn TrackingStore>,
    default_lookback_days: u32,
}

impl StreakEngine {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        Self {
            store,
            default_lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Override the window used when a query does not specify one.
    pub fn with_default_lookback(mut self, lookback_days: u32) -> Self {
        self.default_lookback_days = lookback_days;
        self
    }

    /// Compute a summary from a caller-marshalled query.
    ///
    /// A missing `today` means the current UTC day.
    pub async fn get_summary(&self, query: &StreakQuery) -> Result<StreakSummary> {
        let today = match query.today.as_deref() {
            Some(raw) => parse_reference_day(raw)?,
            None => utc_day(Utc::now()),
        };
        let lookback_days = query.lookback_days.unwrap_or(self.default_lookback_days);

        self.compute_summary(&query.user_id, today, lookback_days)
            .await
    }

    /// Compute the streak summary for `user_id` as of `today`.
    pub async fn compute_summary(
        &self,
        user_id: &str,
        today: NaiveDate,
        lookback_days: u32,
    ) -> Result<StreakSummary> {
        validate_request(user_id, lookback_days)?;
        check_calendar_bounds(today, lookback_days)?;

        let range_start = window_start(today, lookback_days);
        tracing::debug!(
            user_id,
            %today,
            lookback_days,
            "Computing streak summary"
        );

        let activity_days = self
            .store
            .list_activity_days(
                user_id,
                start_of_utc_day(range_start),
                end_of_utc_day(today),
            )
            .await?;

        let summary = summarize_activity(user_id, today, lookback_days, &activity_days);

        if let Some(celebration) = &summary.celebration {
            tracing::info!(
                user_id,
                milestone = %celebration.milestone_id,
                "Streak milestone unlocked"
            );
        }

        Ok(summary)
    }
}

fn validate_request(user_id: &str, lookback_days: u32) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("userId is required".to_string()));
    }
    if !(1..=MAX_LOOKBACK_DAYS).contains(&lookback_days) {
        return Err(AppError::Validation(format!(
            "lookbackDays must be between 1 and {}, got {}",
            MAX_LOOKBACK_DAYS, lookback_days
        )));
    }
    Ok(())
}

/// Reject a reference day whose window or calendar strip would start before
/// the earliest representable date.
fn check_calendar_bounds(today: NaiveDate, lookback_days: u32) -> Result<()> {
    let span = u64::from(lookback_days).max(RECENT_ACTIVITY_WINDOW) - 1;
    if today.checked_sub_days(Days::new(span)).is_none() {
        return Err(AppError::Validation(format!(
            "Reference day {} is too close to the calendar bounds",
            today
        )));
    }
    Ok(())
}

/// First day of the inclusive window `[today - lookback_days + 1, today]`.
fn window_start(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    add_days(today, 1 - i64::from(lookback_days.max(1)))
}

/// Derive a streak summary from raw activity days.
///
/// Days outside the lookback window are ignored; duplicates and ordering of
/// the input do not matter.
pub fn summarize_activity(
    user_id: &str,
    today: NaiveDate,
    lookback_days: u32,
    activity_days: &[NaiveDate],
) -> StreakSummary {
    let range_start = window_start(today, lookback_days);

    let mut days: Vec<NaiveDate> = activity_days
        .iter()
        .copied()
        .filter(|day| *day >= range_start && *day <= today)
        .collect();
    days.sort_unstable();
    days.dedup();

    let day_set: HashSet<NaiveDate> = days.iter().copied().collect();

    let current_streak = current_streak(today, range_start, &day_set);

    // Single forward scan: longest run plus the first day each rung was reached.
    let mut achieved_at: [Option<NaiveDate>; STREAK_GOALS.len()] = [None; STREAK_GOALS.len()];
    let mut longest_streak = 0u32;
    let mut run_length = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for &day in &days {
        run_length = match previous {
            Some(prev) if day.signed_duration_since(prev).num_days() == 1 => run_length + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run_length);

        for (slot, goal) in achieved_at.iter_mut().zip(STREAK_GOALS.iter()) {
            if slot.is_none() && run_length >= goal.target_days {
                *slot = Some(day);
            }
        }

        previous = Some(day);
    }

    let goals: Vec<StreakGoalSummary> = STREAK_GOALS
        .iter()
        .zip(achieved_at)
        .map(|(goal, at)| StreakGoalSummary::new(goal, at))
        .collect();

    let next_goal = goals.iter().find(|goal| !goal.achieved).cloned();

    // Cells before the earliest representable date are left out
    let recent_activity = (0..RECENT_ACTIVITY_WINDOW)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| RecentActivityDay {
            date,
            logged: day_set.contains(&date),
        })
        .collect();

    let celebration = goals
        .iter()
        .find(|goal| goal.target_days == CELEBRATED_TARGET_DAYS)
        .filter(|goal| goal.achieved_at == Some(today) && current_streak == goal.target_days)
        .map(|goal| week_celebration(goal, today));

    StreakSummary {
        user_id: user_id.to_string(),
        today,
        current_streak,
        longest_streak,
        active: current_streak > 0,
        last_activity_date: days.last().copied(),
        recent_activity,
        goals,
        next_goal,
        celebration,
    }
}

/// Consecutive days ending at `today`, never reaching past `range_start`.
fn current_streak(today: NaiveDate, range_start: NaiveDate, days: &HashSet<NaiveDate>) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor.filter(|day| *day >= range_start && days.contains(day)) {
        streak += 1;
        cursor = day.checked_sub_days(Days::new(1));
    }
    streak
}

fn week_celebration(goal: &StreakGoalSummary, today: NaiveDate) -> StreakCelebration {
    StreakCelebration {
        milestone_id: goal.id.clone(),
        unlocked_at: today,
        headline: "Seven-day streak unlocked!".to_string(),
        message: "You logged workouts or meals every day this week. \
                  Keep the fire going and let your circle know."
            .to_string(),
        suggested_caption:
            "Seven days straight on ACOGO Fitness. Who's chasing the streak with me? 💥"
                .to_string(),
    }
}
