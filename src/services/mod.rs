// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod feed;
pub mod friendship;
pub mod streak;
pub mod tracking;

pub use feed::{FeedAssembler, FeedAudience};
pub use friendship::FriendshipService;
pub use streak::{summarize_activity, StreakEngine};
pub use tracking::TrackingService;
