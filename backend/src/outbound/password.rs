//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt is deliberately slow, so hashing runs on tokio's blocking pool
//! rather than an actix worker thread.

use async_trait::async_trait;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Smallest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Largest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Salted bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher using `cost` rounds (4..=31).
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordHashError::hashing(format!(
                "bcrypt cost must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }

    /// Configured work factor.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &encoded))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("valid cost")
    }

    #[rstest]
    #[tokio::test]
    async fn verify_accepts_the_hashed_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("s3cret").await.expect("hash");

        assert!(hash.as_str().starts_with("$2"));
        assert!(hasher.verify("s3cret", &hash).await.expect("verify"));
        assert!(!hasher.verify("S3cret", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("same").await.expect("hash");
        let second = hasher.hash("same").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_reported(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify("pw", &PasswordHash::new("not-a-bcrypt-hash"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }

    #[rstest]
    #[case(3)]
    #[case(32)]
    fn rejects_out_of_range_cost(#[case] cost: u32) {
        assert!(BcryptPasswordHasher::new(cost).is_err());
    }

    #[test]
    fn default_cost_is_ten() {
        assert_eq!(BcryptPasswordHasher::default().cost(), 10);
    }
}
