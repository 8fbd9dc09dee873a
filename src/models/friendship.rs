// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friend requests and accepted friendship edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Declined,
}

/// Stored friend request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub id: String,
    pub requester_id: String,
    pub addressee_id: String,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

/// Directed accepted-friend edge `user_id → friend_id`.
///
/// Always stored as a symmetric pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: String,
    pub user_id: String,
    pub friend_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_not_self"))]
pub struct SendFriendRequestInput {
    #[validate(length(min = 1, message = "requesterId is required"))]
    pub requester_id: String,
    #[validate(length(min = 1, message = "addresseeId is required"))]
    pub addressee_id: String,
    #[validate(length(max = 300, message = "message must be 300 characters or fewer"))]
    pub message: Option<String>,
}

fn validate_not_self(input: &SendFriendRequestInput) -> Result<(), ValidationError> {
    if input.requester_id == input.addressee_id {
        return Err(ValidationError::new("self_request")
            .with_message("You cannot add yourself as a friend.".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestAction {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondFriendRequestInput {
    #[validate(length(min = 1, message = "requestId is required"))]
    pub request_id: String,
    #[validate(length(min = 1, message = "responderId is required"))]
    pub responder_id: String,
    pub action: FriendRequestAction,
}
