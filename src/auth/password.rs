use thiserror::Error;

/// bcrypt work factor for stored credentials
const COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("hash error: {0}")]
    Hash(String),
}

/// One-way, salted digest of a plaintext password.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plain, COST).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Compare a plaintext password against a stored digest.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plain, hash).map_err(|e| PasswordError::Hash(e.to_string()))
}
