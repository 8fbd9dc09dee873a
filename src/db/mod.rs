// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence interfaces consumed by the services.
//!
//! The services only see these traits. Production storage lives outside this
//! crate; [`MemoryStore`] implements every trait for tests and local wiring.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    FriendRequest, FriendRequestStatus, Friendship, MealInput, MealLog, MeasurementEntry,
    MeasurementInput, PostDraft, PostEntity, SendFriendRequestInput, WeightEntry, WeightInput,
    WorkoutEntry, WorkoutInput,
};

/// Errors raised by a persistence collaborator.
///
/// Services never interpret these; they propagate unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Logged meals, workouts and body metrics.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    async fn create_meal(&self, meal: &MealInput) -> StoreResult<MealLog>;

    async fn create_workout(&self, workout: &WorkoutInput) -> StoreResult<WorkoutEntry>;

    async fn create_weight(&self, weight: &WeightInput) -> StoreResult<WeightEntry>;

    async fn create_measurement(
        &self,
        measurement: &MeasurementInput,
    ) -> StoreResult<MeasurementEntry>;

    /// Meals logged within `[start, end]` inclusive.
    async fn list_meals_by_user_and_date(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MealLog>>;

    /// Workouts logged within `[start, end]` inclusive.
    async fn list_workouts_by_user_and_date(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<WorkoutEntry>>;

    /// Most recent weights first.
    async fn list_weights_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<WeightEntry>>;

    /// Most recent measurements first.
    async fn list_measurements_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<MeasurementEntry>>;

    /// Weights within `[start, end]`, oldest first.
    async fn list_weight_history(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<WeightEntry>>;

    /// Distinct UTC days within `[start, end]` on which the user logged a meal
    /// or a workout, in ascending order.
    async fn list_activity_days(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<NaiveDate>>;
}

/// Friend graph reads and post storage used by the feed.
#[async_trait]
pub trait SocialStore: Send + Sync {
    async fn list_accepted_friend_ids(&self, user_id: &str) -> StoreResult<Vec<String>>;

    /// Ids that `user_id` has tagged as close friends.
    async fn list_close_friend_ids(&self, user_id: &str) -> StoreResult<Vec<String>>;

    /// Persist a post, assigning its id and a monotonic `created_at`.
    async fn create_post(&self, draft: PostDraft) -> StoreResult<PostEntity>;

    async fn list_posts_for_users(&self, user_ids: &[String]) -> StoreResult<Vec<PostEntity>>;
}

/// Friend request lifecycle and graph writes.
#[async_trait]
pub trait FriendshipStore: Send + Sync {
    /// Pending request from `requester_id` to `addressee_id`, if any.
    async fn find_pending_request_between(
        &self,
        requester_id: &str,
        addressee_id: &str,
    ) -> StoreResult<Option<FriendRequest>>;

    async fn get_friend_request(&self, id: &str) -> StoreResult<Option<FriendRequest>>;

    async fn create_friend_request(
        &self,
        input: &SendFriendRequestInput,
    ) -> StoreResult<FriendRequest>;

    async fn update_friend_request_status(
        &self,
        id: &str,
        status: FriendRequestStatus,
    ) -> StoreResult<Option<FriendRequest>>;

    /// Create both directed edges of an accepted friendship.
    async fn create_friendship_pair(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> StoreResult<(Friendship, Friendship)>;

    async fn are_users_connected(&self, user_id: &str, friend_id: &str) -> StoreResult<bool>;

    /// Add (`close = true`) or remove the close-friend edge `owner_id → friend_id`.
    async fn set_close_friend(
        &self,
        owner_id: &str,
        friend_id: &str,
        close: bool,
    ) -> StoreResult<()>;
}
