use chrono::{DateTime, Utc};

/// bcrypt work factor used for stored admin passwords.
pub const DEFAULT_HASH_COST: u32 = 10;

#[derive(Debug, Default, PartialEq, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never the plain password
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Compares a candidate password against the stored hash. A malformed
    /// hash compares as a mismatch.
    pub fn verify_password(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.password).unwrap_or(false)
    }
}

pub fn hash_password(password: &str, cost: u32) -> anyhow::Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}
