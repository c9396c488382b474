//! Property-based tests for request validation

use proptest::prelude::*;
use workboard::backend::auth::handlers::RegisterRequest;
use workboard::backend::workspace::BoardRequest;

proptest! {
    #[test]
    fn test_board_name_is_trimmed(name in "[a-zA-Z0-9 ]{1,64}", pad in " {0,4}") {
        prop_assume!(!name.trim().is_empty());
        let request = BoardRequest {
            name: format!("{pad}{name}{pad}"),
            description: None,
        };

        let input = request.validate().unwrap();
        prop_assert_eq!(input.name, name.trim());
    }

    #[test]
    fn test_board_name_length_counts_characters(len in 1usize..300) {
        let request = BoardRequest {
            name: "é".repeat(len),
            description: None,
        };

        prop_assert_eq!(request.validate().is_ok(), len <= 255);
    }

    #[test]
    fn test_short_passwords_are_rejected(password in "[a-z]{1,7}") {
        let request = RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: password.clone(),
            password_confirmation: password,
        };

        let err = request.validate().unwrap_err();
        prop_assert_eq!(err.client_message(), "password must be at least 8 characters long");
    }
}
