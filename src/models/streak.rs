// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak report types and the fixed milestone ladder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A rung on the milestone ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakGoal {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub target_days: u32,
}

/// Milestone ladder, ascending by `target_days`.
pub const STREAK_GOALS: [StreakGoal; 5] = [
    StreakGoal {
        id: "streak-3",
        label: "3-Day Spark",
        description: "Three straight days of logged meals or workouts.",
        target_days: 3,
    },
    StreakGoal {
        id: "streak-7",
        label: "Momentum Week",
        description: "A full week of consistent logging. Share the win!",
        target_days: 7,
    },
    StreakGoal {
        id: "streak-14",
        label: "Two-Week Groove",
        description: "Fourteen days in a row. You're unstoppable.",
        target_days: 14,
    },
    StreakGoal {
        id: "streak-30",
        label: "Monthly Focus",
        description: "Thirty consecutive days of showing up for yourself.",
        target_days: 30,
    },
    StreakGoal {
        id: "streak-60",
        label: "Season Starter",
        description: "Sixty straight days. Friends have to notice this.",
        target_days: 60,
    },
];

/// Target of the rung whose first unlock triggers a celebration.
pub const CELEBRATED_TARGET_DAYS: u32 = 7;

/// A ladder rung with the user's achievement status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakGoalSummary {
    pub id: String,
    pub label: String,
    pub description: String,
    pub target_days: u32,
    pub achieved: bool,
    /// First day a consecutive run reached `target_days`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved_at: Option<NaiveDate>,
}

impl StreakGoalSummary {
    pub fn new(goal: &StreakGoal, achieved_at: Option<NaiveDate>) -> Self {
        Self {
            id: goal.id.to_string(),
            label: goal.label.to_string(),
            description: goal.description.to_string(),
            target_days: goal.target_days,
            achieved: achieved_at.is_some(),
            achieved_at,
        }
    }
}

/// One cell of the recent-activity calendar strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecentActivityDay {
    pub date: NaiveDate,
    pub logged: bool,
}

/// One-shot prompt shown the day a milestone is unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakCelebration {
    pub milestone_id: String,
    pub unlocked_at: NaiveDate,
    pub headline: String,
    pub message: String,
    pub suggested_caption: String,
}

/// Streak report for one user as of one reference day.
///
/// Recomputed on every request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakSummary {
    pub user_id: String,
    pub today: NaiveDate,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<NaiveDate>,
    pub recent_activity: Vec<RecentActivityDay>,
    pub goals: Vec<StreakGoalSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_goal: Option<StreakGoalSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<StreakCelebration>,
}

/// Streak request as marshalled by callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakQuery {
    pub user_id: String,
    /// Reference day (`YYYY-MM-DD` or RFC3339). Defaults to the current UTC day.
    pub today: Option<String>,
    /// Window size in days. Defaults to the configured lookback.
    pub lookback_days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_is_strictly_ascending() {
        assert!(STREAK_GOALS
            .windows(2)
            .all(|pair| pair[0].target_days < pair[1].target_days));
        assert_eq!(
            STREAK_GOALS.map(|g| g.target_days),
            [3, 7, 14, 30, 60]
        );
    }

    #[test]
    fn test_celebrated_rung_is_on_the_ladder() {
        let rung = STREAK_GOALS
            .iter()
            .find(|g| g.target_days == CELEBRATED_TARGET_DAYS)
            .expect("celebrated rung must exist");
        assert_eq!(rung.id, "streak-7");
    }

    #[test]
    fn test_goal_summary_serializes_camel_case() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let summary = StreakGoalSummary::new(&STREAK_GOALS[1], Some(day));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["targetDays"], 7);
        assert_eq!(json["achieved"], true);
        assert_eq!(json["achievedAt"], "2024-01-07");
    }

    #[test]
    fn test_unachieved_goal_omits_achieved_at() {
        let summary = StreakGoalSummary::new(&STREAK_GOALS[0], None);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["achieved"], false);
        assert!(json.get("achievedAt").is_none());
    }
}
