//! Property tests for bearer token issue/verification

use proptest::prelude::*;

use bizdir_backend::services::auth::{AuthService, TOKEN_TTL_SECS};

/// Generate usernames the way the API accepts them
fn username_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{3,24}"
}

proptest! {
    /// Any (id, username) pair round-trips through issue/validate with the
    /// fixed one-hour lifetime.
    #[test]
    fn token_round_trips_any_admin(
        id in 1..1_000_000i32,
        username in username_strategy(),
    ) {
        let auth = AuthService::new("proptest-secret");
        let token = auth.issue_token(id, &username).unwrap();
        let claims = auth.validate_token(&token).unwrap();

        prop_assert_eq!(claims.id, id);
        prop_assert_eq!(claims.username, username);
        prop_assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    /// A token signed with one secret never validates under another.
    #[test]
    fn token_is_bound_to_its_secret(
        id in 1..1_000_000i32,
        username in username_strategy(),
    ) {
        let token = AuthService::new("secret-one")
            .issue_token(id, &username)
            .unwrap();

        prop_assert!(AuthService::new("secret-two")
            .validate_token(&token)
            .is_err());
    }
}
