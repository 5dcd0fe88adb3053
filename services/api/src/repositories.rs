//! In-memory repository for users and their addresses

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::hash_password;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{
    Address, AddressPatch, NewAddress, NewUser, User, UserPatch, created_at_now,
};

/// Last user id handed out before any user is created
pub const INITIAL_USER_ID: u64 = 125;

/// Last address id handed out before any address is created
pub const INITIAL_ADDRESS_ID: u64 = 3;

/// Largest id a caller may choose explicitly; anything above gets a generated id
pub const MAX_EXPLICIT_ID: u64 = i64::MAX as u64;

/// Users keyed by id, iterated in insertion order
#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<u64, User>,
    order: Vec<u64>,
}

impl UserTable {
    /// Insert or replace; a replaced user keeps its position
    fn upsert(&mut self, user: User) {
        let id = user.id;
        if self.users.insert(id, user).is_none() {
            self.order.push(id);
        }
    }

    fn remove(&mut self, id: u64) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&existing| existing != id);
        true
    }

    fn iter(&self) -> impl Iterator<Item = &User> {
        self.order.iter().filter_map(|id| self.users.get(id))
    }
}

/// User repository backed by process memory
///
/// Cloning is cheap and every clone shares the same table and counters.
#[derive(Debug, Clone)]
pub struct UserRepository {
    table: Arc<RwLock<UserTable>>,
    last_user_id: Arc<AtomicU64>,
    last_address_id: Arc<AtomicU64>,
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::from_table(UserTable::default())
    }

    /// Create a repository holding the three demo users
    pub fn with_seed_data() -> Self {
        let mut table = UserTable::default();
        for user in seed_users() {
            table.upsert(user);
        }
        info!("Seeded user repository with {} users", table.users.len());
        Self::from_table(table)
    }

    fn from_table(table: UserTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
            last_user_id: Arc::new(AtomicU64::new(INITIAL_USER_ID)),
            last_address_id: Arc::new(AtomicU64::new(INITIAL_ADDRESS_ID)),
        }
    }

    /// Snapshot of all users in insertion order
    pub async fn find_all(&self) -> Vec<User> {
        let table = self.table.read().await;
        table.iter().cloned().collect()
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: u64) -> Option<User> {
        debug!("Finding user by ID: {}", id);
        self.table.read().await.users.get(&id).cloned()
    }

    /// Persist a new user
    ///
    /// A missing id is generated. An explicit one up to [`MAX_EXPLICIT_ID`] is
    /// kept and reserved so the counter never hands it out again. The password is hashed and the
    /// creation time stamped on every save.
    pub async fn save(&self, new_user: NewUser) -> User {
        let id = new_user
            .id
            .and_then(|id| reserve(&self.last_user_id, id))
            .unwrap_or_else(|| self.generate_new_user_id());

        let user = User {
            id,
            email: new_user.email,
            name: new_user.name,
            password_hash: hash_password(&new_user.password),
            created_at: created_at_now(),
            addresses: self.assign_address_ids(new_user.addresses),
        };

        info!("Saving user {} ({})", user.id, user.email);
        self.table.write().await.upsert(user.clone());
        user
    }

    /// Delete a user and its addresses, returning whether one was removed
    pub async fn delete_by_id(&self, id: u64) -> bool {
        let removed = self.table.write().await.remove(id);
        if removed {
            info!("Deleted user {}", id);
        }
        removed
    }

    /// Merge a patch into an existing user
    ///
    /// `created_at` is never touched.
    pub async fn update(&self, id: u64, patch: UserPatch) -> Option<User> {
        let mut table = self.table.write().await;
        let user = table.users.get_mut(&id)?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(password) = patch.password {
            user.password_hash = hash_password(&password);
        }
        if let Some(addresses) = patch.addresses {
            user.addresses = self.assign_address_ids(addresses);
        }

        debug!("Updated user {}", id);
        Some(user.clone())
    }

    /// Addresses of a user; `None` only when the user does not exist
    pub async fn find_addresses_by_user_id(&self, user_id: u64) -> Option<Vec<Address>> {
        let table = self.table.read().await;
        table.users.get(&user_id).map(|user| user.addresses.clone())
    }

    /// Find one address of a user
    pub async fn find_address_by_id(&self, user_id: u64, address_id: u64) -> Option<Address> {
        let table = self.table.read().await;
        table
            .users
            .get(&user_id)?
            .addresses
            .iter()
            .find(|address| address.id == address_id)
            .cloned()
    }

    /// Merge a patch into one address of a user
    pub async fn update_address(
        &self,
        user_id: u64,
        address_id: u64,
        patch: AddressPatch,
    ) -> Option<Address> {
        let mut table = self.table.write().await;
        let address = table
            .users
            .get_mut(&user_id)?
            .addresses
            .iter_mut()
            .find(|address| address.id == address_id)?;

        address.apply(patch);
        debug!("Updated address {} of user {}", address_id, user_id);
        Some(address.clone())
    }

    /// Issue the next address id
    pub fn generate_new_address_id(&self) -> u64 {
        self.last_address_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn generate_new_user_id(&self) -> u64 {
        self.last_user_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Give every address a unique id within the list
    ///
    /// Explicit ids are kept unless already taken in this list or out of range.
    fn assign_address_ids(&self, addresses: Vec<NewAddress>) -> Vec<Address> {
        let mut used = HashSet::with_capacity(addresses.len());
        addresses
            .into_iter()
            .map(|address| {
                let id = address
                    .id
                    .filter(|id| !used.contains(id))
                    .and_then(|id| reserve(&self.last_address_id, id))
                    .unwrap_or_else(|| self.generate_new_address_id());
                used.insert(id);
                address.into_address(id)
            })
            .collect()
    }

    /// Store a user exactly as given, bypassing hashing and stamping
    #[cfg(test)]
    pub(crate) async fn insert_raw(&self, user: User) {
        self.table.write().await.upsert(user);
    }
}

/// Advance `counter` past an explicit id so it is never generated again
fn reserve(counter: &AtomicU64, id: u64) -> Option<u64> {
    if id > MAX_EXPLICIT_ID {
        return None;
    }
    counter.fetch_max(id, Ordering::SeqCst);
    Some(id)
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 123,
            email: "user1@mail.com".to_string(),
            name: "user1".to_string(),
            password_hash: hash_password("123456"),
            created_at: "01-01-2024 00:00:00".to_string(),
            addresses: vec![
                NewAddress::new("workaddress", "street No. 1", "UK").into_address(1),
                NewAddress::new("homeaddress", "street No. 2", "AU").into_address(2),
            ],
        },
        User {
            id: 124,
            email: "user2@mail.com".to_string(),
            name: "user2".to_string(),
            password_hash: hash_password("password123"),
            created_at: created_at_now(),
            addresses: vec![NewAddress::new("vacationhome", "beach street", "ES").into_address(3)],
        },
        User {
            id: 125,
            email: "user3@mail.com".to_string(),
            name: "user3".to_string(),
            password_hash: hash_password("securepass"),
            created_at: created_at_now(),
            addresses: vec![],
        },
    ]
}
