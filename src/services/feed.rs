// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post publishing and privacy-scoped friend feeds.

use futures_util::{stream, StreamExt, TryStreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use validator::Validate;

use crate::db::{SocialStore, StoreError};
use crate::error::{AppError, Result};
use crate::models::post::MAX_POST_CHARS;
use crate::models::{PostAttachment, PostDraft, PostEntity, PostPrivacy, PublishPostInput};

/// Default bound on concurrent per-author close-friend lookups.
pub const DEFAULT_MAX_CONCURRENT_READS: usize = 16;
const MAX_LOCATION_CHARS: usize = 120;

/// Publishes posts and assembles the feed a viewer is allowed to see.
#[derive(Clone)]
pub struct FeedAssembler {
    store: Arc<dyn SocialStore>,
    max_concurrent_reads: usize,
}

impl FeedAssembler {
    pub fn new(store: Arc<dyn SocialStore>) -> Self {
        Self {
            store,
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
        }
    }

    pub fn with_max_concurrent_reads(mut self, max: usize) -> Self {
        self.max_concurrent_reads = max.max(1);
        self
    }

    /// Validate, normalize and persist a new post.
    pub async fn publish_post(&self, input: PublishPostInput) -> Result<PostEntity> {
        let draft = prepare_post(input)?;
        let post = self.store.create_post(draft).await?;

        tracing::info!(
            author_id = %post.author_id,
            post_id = %post.id,
            privacy = %post.privacy,
            attachments = post.attachments.len(),
            "Post published"
        );

        Ok(post)
    }

    /// Posts by the viewer and their accepted friends that the viewer may see,
    /// newest first.
    pub async fn get_friend_feed(&self, viewer_id: &str) -> Result<Vec<PostEntity>> {
        if viewer_id.trim().is_empty() {
            return Err(AppError::Validation("userId is required".to_string()));
        }

        let friend_ids = self.store.list_accepted_friend_ids(viewer_id).await?;

        // Viewer first, then friends in store order, without duplicates
        let mut seen = HashSet::new();
        let relevant_ids: Vec<String> = std::iter::once(viewer_id.to_string())
            .chain(friend_ids.iter().cloned())
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let store = &self.store;
        let close_friends = stream::iter(relevant_ids.iter())
            .map(|author_id| async move {
                let tagged: HashSet<String> = store
                    .list_close_friend_ids(author_id)
                    .await?
                    .into_iter()
                    .collect();
                Ok::<_, StoreError>((author_id.clone(), tagged))
            })
            .buffer_unordered(self.max_concurrent_reads)
            .try_collect::<HashMap<String, HashSet<String>>>();
        let posts = store.list_posts_for_users(&relevant_ids);

        let (close_friends_of, posts) = tokio::try_join!(close_friends, posts)?;

        let audience = FeedAudience {
            viewer_id: viewer_id.to_string(),
            friends: friend_ids.into_iter().collect(),
            close_friends_of,
        };

        let mut feed: Vec<PostEntity> = posts
            .into_iter()
            .filter(|post| audience.can_see(post))
            .collect();
        // Stable: equal timestamps keep store order
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!(
            viewer_id,
            authors = relevant_ids.len(),
            visible = feed.len(),
            "Assembled friend feed"
        );

        Ok(feed)
    }
}

/// The friend graph as seen from one viewer.
#[derive(Debug, Clone, Default)]
pub struct FeedAudience {
    pub viewer_id: String,
    /// Viewer's accepted friends
    pub friends: HashSet<String>,
    /// Author id to the ids that author tagged as close friends
    pub close_friends_of: HashMap<String, HashSet<String>>,
}

impl FeedAudience {
    /// Whether the viewer may see `post`.
    pub fn can_see(&self, post: &PostEntity) -> bool {
        if post.author_id == self.viewer_id {
            return true;
        }

        match post.privacy {
            PostPrivacy::Public => true,
            PostPrivacy::Friends => self.friends.contains(&post.author_id),
            PostPrivacy::CloseFriends => self
                .close_friends_of
                .get(&post.author_id)
                .is_some_and(|tagged| tagged.contains(&self.viewer_id)),
            PostPrivacy::Private => false,
        }
    }
}

/// Validate a publish request and normalize it into a store draft.
fn prepare_post(input: PublishPostInput) -> Result<PostDraft> {
    if input.author_id.trim().is_empty() {
        return Err(AppError::Validation("authorId is required".to_string()));
    }
    input.validate()?;

    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation(
            "Posts require at least one character.".to_string(),
        ));
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(AppError::Validation(format!(
            "Posts cannot exceed {} characters.",
            MAX_POST_CHARS
        )));
    }

    let location = non_blank(input.location.as_deref());
    if location
        .as_ref()
        .is_some_and(|loc| loc.chars().count() > MAX_LOCATION_CHARS)
    {
        return Err(AppError::Validation(format!(
            "Locations must be under {} characters.",
            MAX_LOCATION_CHARS
        )));
    }

    let attachments = input
        .attachments
        .into_iter()
        .map(|attachment| PostAttachment {
            alt: non_blank(attachment.alt.as_deref()),
            ..attachment
        })
        .collect();

    Ok(PostDraft {
        author_id: input.author_id,
        content: content.to_string(),
        privacy: input.privacy.unwrap_or_default(),
        location,
        attachments,
        high_fives: 0,
        comments: Vec::new(),
    })
}

/// Trim an optional string, mapping blank values to `None`.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
