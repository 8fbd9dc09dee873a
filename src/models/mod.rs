// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod friendship;
pub mod post;
pub mod streak;
pub mod tracking;

pub use friendship::{
    FriendRequest, FriendRequestAction, FriendRequestStatus, Friendship,
    RespondFriendRequestInput, SendFriendRequestInput,
};
pub use post::{
    AttachmentKind, PostAttachment, PostComment, PostDraft, PostEntity, PostPrivacy,
    PublishPostInput,
};
pub use streak::{
    RecentActivityDay, StreakCelebration, StreakGoal, StreakGoalSummary, StreakQuery,
    StreakSummary, STREAK_GOALS,
};
pub use tracking::{
    DailySummary, Exercise, ExerciseSet, MealInput, MealLog, MeasurementEntry, MeasurementInput,
    MeasurementUnit, PerceivedIntensity, WeightEntry, WeightInput, WorkoutEntry, WorkoutInput,
};
