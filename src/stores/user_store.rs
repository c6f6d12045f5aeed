use crate::models::user::User;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Error returned when inserting a user whose username is already taken.
#[derive(Debug)]
pub struct UsernameTaken;

/// In-memory user store keyed by username
pub struct UserStore {
    users: DashMap<String, Arc<User>>,
}

impl UserStore {
    /// Create a new UserStore instance
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Insert a new user, enforcing username uniqueness.
    ///
    /// The entry API makes concurrent duplicate registrations race to a
    /// single winner; every loser sees `UsernameTaken`.
    pub fn insert(&self, user: User) -> Result<Arc<User>, UsernameTaken> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(UsernameTaken),
            Entry::Vacant(slot) => {
                let user = Arc::new(user);
                slot.insert(Arc::clone(&user));
                Ok(user)
            }
        }
    }

    /// Look up a user by username
    pub fn find_by_username(&self, username: &str) -> Option<Arc<User>> {
        self.users.get(username).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
