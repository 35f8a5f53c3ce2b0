use super::errors::PasswordError;

/// bcrypt only reads the first 72 bytes of its input.
const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Produces self-describing bcrypt strings (`$2b$<cost>$<salt><digest>`) so the
/// cost and salt travel with the stored hash.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher using the bcrypt default cost.
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Create a hasher with an explicit bcrypt cost factor.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Returns
    /// bcrypt hash string (includes algorithm version, cost, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password longer than 72 bytes, invalid cost, or the
    ///   salt could not be generated
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::HashingFailed(format!(
                "password is {} bytes, maximum is {}",
                password.len(),
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant-time inside bcrypt; the cost and salt
    /// are taken from `hash`, not from this hasher.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `InvalidHash` - Stored hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        // Over-long candidates can never have produced a stored hash.
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::Mismatch);
        }

        match bcrypt::verify(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordError::Mismatch),
            // bcrypt's error text echoes the stored hash; keep it out of logs.
            Err(_) => Err(PasswordError::InvalidHash),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
