use uuid::Uuid;

pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Clone, Debug)]
pub struct User {
    /// Unique user ID, assigned at registration
    pub id: Uuid,
    /// Login name, unique across the store
    pub username: String,
    /// bcrypt digest of the password; the plaintext is never stored
    pub password_hash: String,
    /// Role string, open set; only "admin" unlocks elevated routes
    pub role: String,
}

impl User {
    pub fn new(username: String, password_hash: String, role: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            role,
        }
    }
}
