//! User manager: sorting and password redaction on top of the repository

use std::cmp::Ordering;

use tracing::debug;

use crate::{
    models::{Address, AddressPatch, NewUser, User, UserPatch, UserResponse, parse_created_at},
    repositories::UserRepository,
};

/// Field a user listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Email,
    Id,
    Name,
    CreatedAt,
}

impl SortKey {
    /// Parse a `sortedBy` value, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::Email => a.email.cmp(&b.email),
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            // Chronological; unparsable values first, string order breaks ties
            Self::CreatedAt => parse_created_at(&a.created_at)
                .cmp(&parse_created_at(&b.created_at))
                .then_with(|| a.created_at.cmp(&b.created_at)),
        }
    }
}

/// User manager
#[derive(Debug, Clone)]
pub struct UserManager {
    repository: UserRepository,
}

impl UserManager {
    /// Create a new user manager
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    /// List users, sorted ascending when `sorted_by` names a known field
    ///
    /// Unknown or missing keys keep the repository's insertion order.
    pub async fn list_users(&self, sorted_by: Option<&str>) -> Vec<UserResponse> {
        let mut users = self.repository.find_all().await;

        match sorted_by.and_then(SortKey::parse) {
            Some(key) => {
                debug!("Sorting {} users by {:?}", users.len(), key);
                users.sort_by(|a, b| key.compare(a, b));
            }
            None => {
                if let Some(unknown) = sorted_by {
                    debug!("Ignoring unknown sort key: {}", unknown);
                }
            }
        }

        users.into_iter().map(UserResponse::from).collect()
    }

    pub async fn get_user(&self, id: u64) -> Option<UserResponse> {
        self.repository.find_by_id(id).await.map(UserResponse::from)
    }

    pub async fn create_user(&self, new_user: NewUser) -> UserResponse {
        self.repository.save(new_user).await.into()
    }

    pub async fn delete_user(&self, id: u64) -> bool {
        self.repository.delete_by_id(id).await
    }

    pub async fn patch_user(&self, id: u64, patch: UserPatch) -> Option<UserResponse> {
        self.repository.update(id, patch).await.map(UserResponse::from)
    }

    pub async fn get_addresses(&self, user_id: u64) -> Option<Vec<Address>> {
        self.repository.find_addresses_by_user_id(user_id).await
    }

    pub async fn get_address(&self, user_id: u64, address_id: u64) -> Option<Address> {
        self.repository.find_address_by_id(user_id, address_id).await
    }

    pub async fn patch_address(
        &self,
        user_id: u64,
        address_id: u64,
        patch: AddressPatch,
    ) -> Option<Address> {
        self.repository
            .update_address(user_id, address_id, patch)
            .await
    }
}
