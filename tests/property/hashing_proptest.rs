//! Property-based tests for password hashing
//!
//! Every case runs Argon2id, so the case count is kept small.

use proptest::prelude::*;
use workboard::backend::auth::PasswordHasher;

use crate::common::TEST_HASH_PARAMS;

fn hasher() -> PasswordHasher {
    PasswordHasher::with_params(TEST_HASH_PARAMS)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_hash_verifies_own_password(password in "\\PC{1,64}") {
        let hasher = hasher();
        let encoded = hasher.hash(&password).unwrap();

        prop_assert!(encoded.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        prop_assert!(hasher.verify(&password, &encoded).unwrap());
    }

    #[test]
    fn test_hash_rejects_other_password(password in "[a-z]{8,32}", other in "[A-Z]{8,32}") {
        let hasher = hasher();
        let encoded = hasher.hash(&password).unwrap();

        prop_assert!(!hasher.verify(&other, &encoded).unwrap());
    }

    #[test]
    fn test_hash_is_salted(password in "[a-zA-Z0-9]{8,32}") {
        let hasher = hasher();

        prop_assert_ne!(hasher.hash(&password).unwrap(), hasher.hash(&password).unwrap());
    }
}

proptest! {
    #[test]
    fn test_garbage_hash_never_panics(encoded in "\\PC{0,128}") {
        let _ = hasher().verify("password", &encoded);
    }

    #[test]
    fn test_wrong_part_count_is_an_error(parts in prop::collection::vec("[a-z0-9=,]{1,8}", 0..6)) {
        let encoded = format!("${}", parts.join("$"));

        prop_assert!(hasher().verify("password", &encoded).is_err());
    }
}
