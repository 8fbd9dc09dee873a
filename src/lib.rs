// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! ACOGO Fitness: logging streaks and a privacy-scoped social feed
//!
//! This crate provides the core of the fitness tracker: meal and workout
//! logging, streak summaries with milestone celebrations, friend requests,
//! and a feed filtered by each post's privacy level. Persistence is behind
//! the traits in [`db`].

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::{FriendshipStore, MemoryStore, SocialStore, TrackingStore};
use services::{FeedAssembler, FriendshipService, StreakEngine, TrackingService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub streaks: StreakEngine,
    pub feed: FeedAssembler,
    pub tracking: TrackingService,
    pub friendships: FriendshipService,
}

impl AppState {
    /// Wire every service to one store.
    pub fn new<S>(config: Config, store: Arc<S>) -> Self
    where
        S: TrackingStore + SocialStore + FriendshipStore + 'static,
    {
        let streaks = StreakEngine::new(store.clone())
            .with_default_lookback(config.streak_lookback_days);
        let feed = FeedAssembler::new(store.clone())
            .with_max_concurrent_reads(config.feed_max_concurrent_reads);
        let tracking = TrackingService::new(store.clone());
        let friendships = FriendshipService::new(store);

        Self {
            config,
            streaks,
            feed,
            tracking,
            friendships,
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }
}
