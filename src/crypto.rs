//! Password hashing logic.

use crate::error::Result;

/// Fixed bcrypt work factor.
const COST: u32 = 10;

/// Compute a salted one-way digest of `password`.
pub fn hash(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, COST)?)
}

/// Check `password` against a stored digest.
pub fn verify(password: &str, digest: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, digest)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash("pw").unwrap();
        assert_ne!(digest, "pw");
        assert!(verify("pw", &digest).unwrap());
        assert!(!verify("wrong", &digest).unwrap());
    }
}
