//! API models for users, request payloads and responses

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Europe::London;
use serde::{Deserialize, Serialize};

pub mod address;

pub use address::{Address, AddressPatch, NewAddress};

/// Storage format of `created_at`
pub const CREATED_AT_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// User entity as held by the repository
///
/// Not serializable on purpose: responses go through [`UserResponse`],
/// which has no password field.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    /// Hex SHA-1 digest, never plaintext
    pub password_hash: String,
    pub created_at: String,
    pub addresses: Vec<Address>,
}

/// Request for user creation
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Ids sent by HTTP clients are ignored
    #[serde(skip_deserializing)]
    pub id: Option<u64>,
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub addresses: Vec<NewAddress>,
}

impl NewUser {
    pub fn new(email: &str, name: &str, password: &str) -> Self {
        Self {
            id: None,
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
            addresses: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_address(mut self, address: NewAddress) -> Self {
        self.addresses.push(address);
        self
    }
}

/// Partial user update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    /// Replaces the whole address list when present
    pub addresses: Option<Vec<NewAddress>>,
}

/// Response for user operations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub addresses: Vec<Address>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            addresses: user.addresses,
        }
    }
}

/// Query parameters for user listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(rename = "sortedBy")]
    pub sorted_by: Option<String>,
}

/// Format an instant the way `created_at` is stored
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.with_timezone(&London).format(CREATED_AT_FORMAT).to_string()
}

/// Current time in the `created_at` format
pub fn created_at_now() -> String {
    format_created_at(Utc::now())
}

/// Parse a stored `created_at` back into a wall-clock time
pub fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, CREATED_AT_FORMAT).ok()
}
