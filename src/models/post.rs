// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social posts and their privacy levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::AppError;

/// Maximum post length after trimming, in characters.
pub const MAX_POST_CHARS: usize = 1000;
/// Maximum number of attachments per post.
pub const MAX_ATTACHMENTS: usize = 4;

/// Who may see a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PostPrivacy {
    /// Anyone whose feed includes the author
    Public,
    /// Accepted friends of the author
    #[default]
    Friends,
    /// Only friends the author tagged as close
    CloseFriends,
    /// Author only
    Private,
}

impl PostPrivacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostPrivacy::Public => "public",
            PostPrivacy::Friends => "friends",
            PostPrivacy::CloseFriends => "close_friends",
            PostPrivacy::Private => "private",
        }
    }
}

impl fmt::Display for PostPrivacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostPrivacy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(PostPrivacy::Public),
            "friends" => Ok(PostPrivacy::Friends),
            "close_friends" => Ok(PostPrivacy::CloseFriends),
            "private" => Ok(PostPrivacy::Private),
            other => Err(AppError::Validation(format!(
                "Invalid privacy '{}': expected public, friends, close_friends or private",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum AttachmentKind {
    Image,
    Video,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PostAttachment {
    pub kind: AttachmentKind,
    #[validate(url(message = "attachment url must be a valid URL"))]
    pub url: String,
    #[validate(length(max = 120))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PostComment {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Publish request as marshalled by callers.
///
/// Content length is checked after trimming, so it is validated by the
/// feed service rather than by a field attribute here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostInput {
    #[validate(length(min = 1, message = "authorId is required"))]
    pub author_id: String,
    pub content: String,
    pub privacy: Option<PostPrivacy>,
    #[serde(default)]
    #[validate(length(max = 4, message = "at most 4 attachments"), nested)]
    pub attachments: Vec<PostAttachment>,
    pub location: Option<String>,
}

/// Normalized post handed to the store for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub author_id: String,
    pub content: String,
    pub privacy: PostPrivacy,
    pub location: Option<String>,
    pub attachments: Vec<PostAttachment>,
    pub high_fives: u32,
    pub comments: Vec<PostComment>,
}

/// A published post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PostEntity {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub privacy: PostPrivacy,
    pub location: Option<String>,
    pub attachments: Vec<PostAttachment>,
    pub high_fives: u32,
    pub comments: Vec<PostComment>,
    pub created_at: DateTime<Utc>,
}

impl PostEntity {
    /// Materialize a draft with store-assigned identity and timestamp.
    pub fn from_draft(id: String, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id: draft.author_id,
            content: draft.content,
            privacy: draft.privacy,
            location: draft.location,
            attachments: draft.attachments,
            high_fives: draft.high_fives,
            comments: draft.comments,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_wire_names_round_trip() {
        for privacy in [
            PostPrivacy::Public,
            PostPrivacy::Friends,
            PostPrivacy::CloseFriends,
            PostPrivacy::Private,
        ] {
            let json = serde_json::to_string(&privacy).unwrap();
            assert_eq!(json, format!("\"{}\"", privacy));
            assert_eq!(privacy.as_str().parse::<PostPrivacy>().unwrap(), privacy);
        }
    }

    #[test]
    fn test_privacy_rejects_unknown_name() {
        let err = "everyone".parse::<PostPrivacy>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_privacy_defaults_to_friends() {
        assert_eq!(PostPrivacy::default(), PostPrivacy::Friends);
    }

    #[test]
    fn test_attachment_url_must_be_valid() {
        let attachment = PostAttachment {
            kind: AttachmentKind::Image,
            url: "not a url".to_string(),
            alt: None,
        };
        assert!(attachment.validate().is_err());
    }

    #[test]
    fn test_too_many_attachments_rejected() {
        let attachment = PostAttachment {
            kind: AttachmentKind::Link,
            url: "https://example.com/route".to_string(),
            alt: None,
        };
        let input = PublishPostInput {
            author_id: "alice".to_string(),
            content: "Five links".to_string(),
            attachments: vec![attachment; MAX_ATTACHMENTS + 1],
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
