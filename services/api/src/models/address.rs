//! Address models for the users service

use serde::{Deserialize, Serialize};

/// Address entity, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: u64,
    pub name: String,
    pub street: String,
    pub country_code: String,
}

/// Address supplied when creating a user or replacing its address list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    /// Ids sent by HTTP clients are ignored; the repository assigns them
    #[serde(skip_deserializing)]
    pub id: Option<u64>,
    pub name: String,
    pub street: String,
    pub country_code: String,
}

impl NewAddress {
    pub fn new(name: &str, street: &str, country_code: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            street: street.to_string(),
            country_code: country_code.to_string(),
        }
    }

    /// Turn into a stored address under the given id
    pub fn into_address(self, id: u64) -> Address {
        Address {
            id,
            name: self.name,
            street: self.street,
            country_code: self.country_code,
        }
    }
}

/// Partial address update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    pub name: Option<String>,
    pub street: Option<String>,
    pub country_code: Option<String>,
}

impl Address {
    /// Merge a patch into this address
    pub fn apply(&mut self, patch: AddressPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(street) = patch.street {
            self.street = street;
        }
        if let Some(country_code) = patch.country_code {
            self.country_code = country_code;
        }
    }
}
