// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store backed by concurrent maps.
//!
//! Implements every store trait so services can be exercised end to end
//! without a database. Records are keyed by owning user id.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::db::{FriendshipStore, SocialStore, StoreResult, TrackingStore};
use crate::models::{
    FriendRequest, FriendRequestStatus, Friendship, MealInput, MealLog, MeasurementEntry,
    MeasurementInput, PostDraft, PostEntity, SendFriendRequestInput, WeightEntry, WeightInput,
    WorkoutEntry, WorkoutInput,
};
use crate::time_utils::utc_day;

/// Thread-safe in-memory implementation of all store traits.
#[derive(Default)]
pub struct MemoryStore {
    meals: DashMap<String, Vec<MealLog>>,
    workouts: DashMap<String, Vec<WorkoutEntry>>,
    weights: DashMap<String, Vec<WeightEntry>>,
    measurements: DashMap<String, Vec<MeasurementEntry>>,
    posts: DashMap<String, Vec<PostEntity>>,
    /// Accepted friends per user (both directions stored)
    friends: DashMap<String, BTreeSet<String>>,
    /// Close-friend tags per owner
    close_friends: DashMap<String, BTreeSet<String>>,
    friend_requests: DashMap<String, FriendRequest>,
    friendships: DashMap<String, Friendship>,
    /// Offset that keeps post timestamps strictly increasing
    post_sequence: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted friendship in both directions.
    pub fn connect(&self, a: &str, b: &str) {
        self.friends
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.friends
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Tag `friend_id` as one of `owner_id`'s close friends.
    pub fn mark_close_friend(&self, owner_id: &str, friend_id: &str) {
        self.close_friends
            .entry(owner_id.to_string())
            .or_default()
            .insert(friend_id.to_string());
    }

    /// Number of stored friendship edges (two per accepted friendship).
    pub fn friendship_edge_count(&self) -> usize {
        self.friendships.len()
    }

    fn next_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn next_post_timestamp(&self) -> DateTime<Utc> {
        let offset = self.post_sequence.fetch_add(1, Ordering::SeqCst);
        Utc::now() + Duration::milliseconds(offset)
    }
}

fn within(ts: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    ts >= start && ts <= end
}

#[async_trait]
impl TrackingStore for MemoryStore {
    async fn create_meal(&self, meal: &MealInput) -> StoreResult<MealLog> {
        let record = MealLog {
            id: Self::next_id(),
            user_id: meal.user_id.clone(),
            logged_at: meal.logged_at,
            name: meal.name.clone(),
            calories: meal.calories,
            protein_grams: meal.protein_grams,
            carbs_grams: meal.carbs_grams,
            fats_grams: meal.fats_grams,
            notes: meal.notes.clone(),
            created_at: Utc::now(),
        };
        self.meals
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn create_workout(&self, workout: &WorkoutInput) -> StoreResult<WorkoutEntry> {
        let record = WorkoutEntry {
            id: Self::next_id(),
            user_id: workout.user_id.clone(),
            logged_at: workout.logged_at,
            title: workout.title.clone(),
            duration_minutes: workout.duration_minutes,
            perceived_intensity: workout.perceived_intensity,
            exercises: workout.exercises.clone(),
            notes: workout.notes.clone(),
            created_at: Utc::now(),
        };
        self.workouts
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn create_weight(&self, weight: &WeightInput) -> StoreResult<WeightEntry> {
        let record = WeightEntry {
            id: Self::next_id(),
            user_id: weight.user_id.clone(),
            logged_at: weight.logged_at,
            weight_kg: weight.weight_kg,
            source: weight.source.clone(),
            note: weight.note.clone(),
            created_at: Utc::now(),
        };
        self.weights
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn create_measurement(
        &self,
        measurement: &MeasurementInput,
    ) -> StoreResult<MeasurementEntry> {
        let record = MeasurementEntry {
            id: Self::next_id(),
            user_id: measurement.user_id.clone(),
            logged_at: measurement.logged_at,
            unit: measurement.unit,
            values: measurement.values.clone(),
            created_at: Utc::now(),
        };
        self.measurements
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_meals_by_user_and_date(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MealLog>> {
        Ok(self
            .meals
            .get(user_id)
            .map(|meals| {
                meals
                    .iter()
                    .filter(|m| within(m.logged_at, start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_workouts_by_user_and_date(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<WorkoutEntry>> {
        Ok(self
            .workouts
            .get(user_id)
            .map(|workouts| {
                workouts
                    .iter()
                    .filter(|w| within(w.logged_at, start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_weights_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<WeightEntry>> {
        let mut entries: Vec<WeightEntry> = self
            .weights
            .get(user_id)
            .map(|w| w.value().clone())
            .unwrap_or_default();
        entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn list_measurements_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<MeasurementEntry>> {
        let mut entries: Vec<MeasurementEntry> = self
            .measurements
            .get(user_id)
            .map(|m| m.value().clone())
            .unwrap_or_default();
        entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn list_weight_history(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<WeightEntry>> {
        let mut entries: Vec<WeightEntry> = self
            .weights
            .get(user_id)
            .map(|w| {
                w.iter()
                    .filter(|e| within(e.logged_at, start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by(|a, b| a.logged_at.cmp(&b.logged_at));
        Ok(entries)
    }

    async fn list_activity_days(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<NaiveDate>> {
        let mut days = BTreeSet::new();

        if let Some(meals) = self.meals.get(user_id) {
            days.extend(
                meals
                    .iter()
                    .filter(|m| within(m.logged_at, start, end))
                    .map(|m| utc_day(m.logged_at)),
            );
        }
        if let Some(workouts) = self.workouts.get(user_id) {
            days.extend(
                workouts
                    .iter()
                    .filter(|w| within(w.logged_at, start, end))
                    .map(|w| utc_day(w.logged_at)),
            );
        }

        Ok(days.into_iter().collect())
    }
}

#[async_trait]
impl SocialStore for MemoryStore {
    async fn list_accepted_friend_ids(&self, user_id: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .friends
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_close_friend_ids(&self, user_id: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .close_friends
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_post(&self, draft: PostDraft) -> StoreResult<PostEntity> {
        let post = PostEntity::from_draft(Self::next_id(), draft, self.next_post_timestamp());
        self.posts
            .entry(post.author_id.clone())
            .or_default()
            .push(post.clone());
        Ok(post)
    }

    async fn list_posts_for_users(&self, user_ids: &[String]) -> StoreResult<Vec<PostEntity>> {
        let authors: HashSet<&str> = user_ids.iter().map(String::as_str).collect();
        let mut posts: Vec<PostEntity> = authors
            .into_iter()
            .filter_map(|author| self.posts.get(author).map(|p| p.value().clone()))
            .flatten()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl FriendshipStore for MemoryStore {
    async fn find_pending_request_between(
        &self,
        requester_id: &str,
        addressee_id: &str,
    ) -> StoreResult<Option<FriendRequest>> {
        Ok(self
            .friend_requests
            .iter()
            .find(|r| {
                r.requester_id == requester_id
                    && r.addressee_id == addressee_id
                    && r.status == FriendRequestStatus::Pending
            })
            .map(|r| r.value().clone()))
    }

    async fn get_friend_request(&self, id: &str) -> StoreResult<Option<FriendRequest>> {
        Ok(self.friend_requests.get(id).map(|r| r.value().clone()))
    }

    async fn create_friend_request(
        &self,
        input: &SendFriendRequestInput,
    ) -> StoreResult<FriendRequest> {
        let request = FriendRequest {
            id: Self::next_id(),
            requester_id: input.requester_id.clone(),
            addressee_id: input.addressee_id.clone(),
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
            message: input.message.clone(),
        };
        self.friend_requests
            .insert(request.id.clone(), request.clone());
        Ok(request)
    }

    async fn update_friend_request_status(
        &self,
        id: &str,
        status: FriendRequestStatus,
    ) -> StoreResult<Option<FriendRequest>> {
        Ok(self.friend_requests.get_mut(id).map(|mut request| {
            request.status = status;
            request.responded_at = Some(Utc::now());
            request.value().clone()
        }))
    }

    async fn create_friendship_pair(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> StoreResult<(Friendship, Friendship)> {
        let now = Utc::now();
        let forward = Friendship {
            id: Self::next_id(),
            user_id: user_id.to_string(),
            friend_id: friend_id.to_string(),
            created_at: now,
        };
        let reverse = Friendship {
            id: Self::next_id(),
            user_id: friend_id.to_string(),
            friend_id: user_id.to_string(),
            created_at: now,
        };

        self.friendships.insert(forward.id.clone(), forward.clone());
        self.friendships.insert(reverse.id.clone(), reverse.clone());
        self.connect(user_id, friend_id);

        Ok((forward, reverse))
    }

    async fn are_users_connected(&self, user_id: &str, friend_id: &str) -> StoreResult<bool> {
        Ok(self
            .friends
            .get(user_id)
            .is_some_and(|set| set.contains(friend_id)))
    }

    async fn set_close_friend(
        &self,
        owner_id: &str,
        friend_id: &str,
        close: bool,
    ) -> StoreResult<()> {
        if close {
            self.mark_close_friend(owner_id, friend_id);
        } else if let Some(mut set) = self.close_friends.get_mut(owner_id) {
            set.remove(friend_id);
        }
        Ok(())
    }
}
