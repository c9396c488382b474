/**
 * Password Hashing
 *
 * This module turns plaintext passwords into self-describing Argon2id
 * strings and checks candidate passwords against them.
 *
 * # Encoded Format
 *
 * ```text
 * $argon2id$v=19$m=65536,t=3,p=1$kl=32$<base64 salt>$<base64 digest>
 * ```
 *
 * Base64 is the standard alphabet without padding. Every parameter needed to
 * recompute the digest travels inside the string, so raising the cost
 * parameters later leaves previously stored hashes verifiable.
 *
 * # Blocking
 *
 * Key derivation is CPU-bound (64 MiB, three passes). Request handlers go
 * through `hash_async` / `verify_async`, which run the work on the blocking
 * pool instead of stalling the async worker.
 */

use std::fmt;
use std::str::FromStr;

use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

/// Length of the random salt in bytes
pub const SALT_LEN: usize = 16;

const ALGORITHM_TAG: &str = "argon2id";

/// Largest memory cost accepted from a stored hash (1 GiB)
pub const MAX_MEMORY_KIB: u32 = 1024 * 1024;

/// Largest number of passes accepted from a stored hash
pub const MAX_ITERATIONS: u32 = 16;

/// Largest degree of parallelism accepted from a stored hash
pub const MAX_PARALLELISM: u32 = 16;

/// Errors produced while hashing or verifying passwords
#[derive(Debug, Error)]
pub enum HashError {
    /// The stored string is not a `$argon2id$...` hash with the seven fields
    #[error("invalid hash format: {0}")]
    InvalidHashFormat(String),

    /// Randomness or key derivation failed while creating a hash
    #[error("hashing failure: {0}")]
    HashingFailure(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
    /// Digest length in bytes
    pub output_len: usize,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 1,
            output_len: 32,
        }
    }
}

impl HashParams {
    /// Costs a stored hash may ask for before verification refuses to run
    fn within_limits(&self) -> bool {
        self.memory_kib <= MAX_MEMORY_KIB
            && self.iterations <= MAX_ITERATIONS
            && self.parallelism <= MAX_PARALLELISM
    }
}

/// A parsed encoded hash
#[derive(Debug, Clone, PartialEq, Eq)]
struct EncodedHash {
    version: u32,
    params: HashParams,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}$kl={}${}${}",
            ALGORITHM_TAG,
            self.version,
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            self.params.output_len,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.digest),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = HashError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = encoded.split('$').collect();
        if parts.len() != 7 || !parts[0].is_empty() {
            return Err(HashError::InvalidHashFormat(format!(
                "expected 7 '$'-separated fields, found {}",
                parts.len()
            )));
        }

        if parts[1] != ALGORITHM_TAG {
            return Err(HashError::InvalidHashFormat("unexpected algorithm tag".to_string()));
        }

        let version = parse_param::<u32>(parts[2], "v=")?;

        let costs: Vec<&str> = parts[3].split(',').collect();
        if costs.len() != 3 {
            return Err(HashError::InvalidHashFormat("invalid hash parameters".to_string()));
        }
        let memory_kib = parse_param::<u32>(costs[0], "m=")?;
        let iterations = parse_param::<u32>(costs[1], "t=")?;
        let parallelism = parse_param::<u32>(costs[2], "p=")?;
        let output_len = parse_param::<usize>(parts[4], "kl=")?;

        let salt = STANDARD_NO_PAD
            .decode(parts[5])
            .map_err(|_| HashError::InvalidHashFormat("invalid salt encoding".to_string()))?;
        let digest = STANDARD_NO_PAD
            .decode(parts[6])
            .map_err(|_| HashError::InvalidHashFormat("invalid digest encoding".to_string()))?;

        Ok(Self {
            version,
            params: HashParams {
                memory_kib,
                iterations,
                parallelism,
                output_len,
            },
            salt,
            digest,
        })
    }
}

fn parse_param<T: FromStr>(field: &str, prefix: &str) -> Result<T, HashError> {
    let value = field.strip_prefix(prefix).ok_or_else(|| {
        HashError::InvalidHashFormat(format!("expected parameter prefix {prefix}"))
    })?;
    value
        .parse::<T>()
        .map_err(|_| HashError::InvalidHashFormat(format!("invalid value for {prefix}")))
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn derive(
    password: &[u8],
    salt: &[u8],
    version: Version,
    params: &HashParams,
) -> Result<Vec<u8>, argon2::Error> {
    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(params.output_len),
    )?;
    let argon2 = Argon2::new(Algorithm::Argon2id, version, argon_params);

    let mut digest = vec![0u8; params.output_len];
    argon2.hash_password_into(password, salt, &mut digest)?;
    Ok(digest)
}

/// Salted Argon2id password hasher
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: HashParams,
}

impl PasswordHasher {
    /// Hasher using the production cost parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher writing new hashes with the given parameters
    pub fn with_params(params: HashParams) -> Self {
        Self { params }
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Errors
    ///
    /// * `HashingFailure` - if the OS random source is unavailable or the
    ///   configured parameters are rejected by Argon2
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::fill(&mut salt)
            .map_err(|e| HashError::HashingFailure(format!("secure randomness unavailable: {e}")))?;

        let digest = derive(password.as_bytes(), &salt, Version::V0x13, &self.params)
            .map_err(|e| HashError::HashingFailure(format!("key derivation failed: {e}")))?;

        let encoded = EncodedHash {
            version: Version::V0x13 as u32,
            params: self.params,
            salt: salt.to_vec(),
            digest,
        };
        Ok(encoded.to_string())
    }

    /// Check a password against an encoded hash
    ///
    /// The digest is recomputed with the parameters embedded in `encoded`,
    /// not with this hasher's own parameters.
    ///
    /// # Returns
    ///
    /// `Ok(true)` only when the recomputed digest equals the stored one.
    /// Unsupported versions, parameters Argon2 rejects, costs above
    /// `MAX_MEMORY_KIB` / `MAX_ITERATIONS` / `MAX_PARALLELISM`, or a digest
    /// whose length differs from `kl` all yield `Ok(false)`.
    ///
    /// # Errors
    ///
    /// * `InvalidHashFormat` - if `encoded` does not have the seven-field shape
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, HashError> {
        let stored = encoded.parse::<EncodedHash>()?;

        if stored.digest.len() != stored.params.output_len {
            return Ok(false);
        }

        if !stored.params.within_limits() {
            return Ok(false);
        }

        let version = match Version::try_from(stored.version) {
            Ok(version) => version,
            Err(_) => return Ok(false),
        };

        match derive(password.as_bytes(), &stored.salt, version, &stored.params) {
            Ok(computed) => Ok(constant_time_eq(&computed, &stored.digest)),
            Err(_) => Ok(false),
        }
    }

    /// `hash` on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String, HashError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| HashError::HashingFailure(format!("hashing task failed: {e}")))?
    }

    /// `verify` on the blocking thread pool
    pub async fn verify_async(&self, password: String, encoded: String) -> Result<bool, HashError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded))
            .await
            .map_err(|e| HashError::HashingFailure(format!("verification task failed: {e}")))?
    }
}
