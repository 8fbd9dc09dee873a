// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friend request lifecycle and close-friend tagging.

use std::sync::Arc;
use validator::Validate;

use crate::db::FriendshipStore;
use crate::error::{AppError, Result};
use crate::models::{
    FriendRequest, FriendRequestAction, FriendRequestStatus, RespondFriendRequestInput,
    SendFriendRequestInput,
};

#[derive(Clone)]
pub struct FriendshipService {
    store: Arc<dyn FriendshipStore>,
}

impl FriendshipService {
    pub fn new(store: Arc<dyn FriendshipStore>) -> Self {
        Self { store }
    }

    /// Open a pending request from `requester_id` to `addressee_id`.
    pub async fn send_friend_request(&self, input: SendFriendRequestInput) -> Result<FriendRequest> {
        input.validate()?;

        let requester = input.requester_id.as_str();
        let addressee = input.addressee_id.as_str();
        let (forward, reverse, connected) = tokio::try_join!(
            self.store.find_pending_request_between(requester, addressee),
            self.store.find_pending_request_between(addressee, requester),
            self.store.are_users_connected(requester, addressee),
        )?;

        if connected {
            return Err(reject(requester, addressee, "Users are already connected."));
        }
        if forward.is_some() {
            return Err(reject(
                requester,
                addressee,
                "This pair already has a pending request.",
            ));
        }
        if reverse.is_some() {
            return Err(reject(
                requester,
                addressee,
                "The recipient already requested you. Respond to their request instead.",
            ));
        }

        let request = self.store.create_friend_request(&input).await?;
        tracing::debug!(
            request_id = %request.id,
            requester_id = requester,
            addressee_id = addressee,
            "Friend request sent"
        );
        Ok(request)
    }

    /// Accept or decline a pending request addressed to the responder.
    pub async fn respond_to_friend_request(
        &self,
        input: RespondFriendRequestInput,
    ) -> Result<FriendRequest> {
        input.validate()?;

        let request = self
            .store
            .get_friend_request(&input.request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found.".to_string()))?;

        if request.status != FriendRequestStatus::Pending {
            return Err(AppError::Domain("Friend request already resolved.".to_string()));
        }
        if request.addressee_id != input.responder_id {
            tracing::warn!(
                request_id = %request.id,
                responder_id = %input.responder_id,
                "Responder does not own friend request"
            );
            return Err(AppError::Domain(
                "Responder is not authorized to manage request.".to_string(),
            ));
        }

        let status = match input.action {
            FriendRequestAction::Accept => {
                self.store
                    .create_friendship_pair(&request.requester_id, &request.addressee_id)
                    .await?;
                FriendRequestStatus::Accepted
            }
            FriendRequestAction::Decline => FriendRequestStatus::Declined,
        };

        let updated = self
            .store
            .update_friend_request_status(&request.id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found.".to_string()))?;

        if status == FriendRequestStatus::Accepted {
            tracing::info!(
                request_id = %updated.id,
                user_id = %updated.requester_id,
                friend_id = %updated.addressee_id,
                "Friend request accepted"
            );
        }

        Ok(updated)
    }

    /// Let `friend_id` see `owner_id`'s close-friends posts.
    pub async fn tag_close_friend(&self, owner_id: &str, friend_id: &str) -> Result<()> {
        self.set_close_friend(owner_id, friend_id, true).await
    }

    pub async fn untag_close_friend(&self, owner_id: &str, friend_id: &str) -> Result<()> {
        self.set_close_friend(owner_id, friend_id, false).await
    }

    async fn set_close_friend(&self, owner_id: &str, friend_id: &str, close: bool) -> Result<()> {
        if owner_id.trim().is_empty() || friend_id.trim().is_empty() {
            return Err(AppError::Validation(
                "ownerId and friendId are required".to_string(),
            ));
        }
        if !self.store.are_users_connected(owner_id, friend_id).await? {
            return Err(AppError::Domain(
                "Close friends must be accepted friends.".to_string(),
            ));
        }

        self.store.set_close_friend(owner_id, friend_id, close).await?;
        tracing::debug!(owner_id, friend_id, close, "Close friend updated");
        Ok(())
    }
}

fn reject(requester_id: &str, addressee_id: &str, reason: &str) -> AppError {
    tracing::warn!(requester_id, addressee_id, reason, "Friend request rejected");
    AppError::Domain(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn request(from: &str, to: &str) -> SendFriendRequestInput {
        SendFriendRequestInput {
            requester_id: from.to_string(),
            addressee_id: to.to_string(),
            message: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_and_reverse_requests_rejected() {
        let service = FriendshipService::new(Arc::new(MemoryStore::new()));
        service.send_friend_request(request("alice", "bob")).await.unwrap();

        let duplicate = service.send_friend_request(request("alice", "bob")).await;
        assert!(
            matches!(&duplicate, Err(AppError::Domain(msg)) if msg.contains("pending")),
            "{:?}",
            duplicate
        );

        let reverse = service.send_friend_request(request("bob", "alice")).await;
        assert!(
            matches!(&reverse, Err(AppError::Domain(msg)) if msg.contains("already requested you")),
            "{:?}",
            reverse
        );
    }

    #[tokio::test]
    async fn test_self_request_is_validation_error() {
        let service = FriendshipService::new(Arc::new(MemoryStore::new()));
        let result = service.send_friend_request(request("alice", "alice")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_close_friend_requires_friendship() {
        let store = Arc::new(MemoryStore::new());
        let service = FriendshipService::new(store.clone());

        let result = service.tag_close_friend("alice", "bob").await;
        assert!(matches!(result, Err(AppError::Domain(_))));

        store.connect("alice", "bob");
        service.tag_close_friend("alice", "bob").await.unwrap();
    }
}
