//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository, UserRecord};
use crate::domain::{EmailAddress, ErrorCode, PasswordHash, Username};

fn alice() -> User {
    User::new(
        UserId::random(),
        Username::new("alice").expect("valid username"),
        EmailAddress::new("alice@x.com").expect("valid email"),
    )
}

fn registration() -> Registration {
    Registration::try_from_parts("alice@x.com", "alice", "pw123").expect("valid registration")
}

fn hasher_returning(hash: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(move |_| Ok(PasswordHash::new(hash)));
    hasher
}

#[tokio::test]
async fn register_stores_hash_not_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|user, hash| user.username().as_str() == "alice" && hash.as_str() == "hashed")
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = AccountService::new(Arc::new(users), Arc::new(hasher_returning("hashed")));
    let user = service
        .register(&registration())
        .await
        .expect("registration succeeds");

    assert_eq!(user.email().as_str(), "alice@x.com");
}

#[rstest]
#[case(UserPersistenceError::duplicate_username(), ErrorCode::Conflict)]
#[case(UserPersistenceError::duplicate_email(), ErrorCode::Conflict)]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_repository_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let service = AccountService::new(Arc::new(users), Arc::new(hasher_returning("hashed")));
    let err = service
        .register(&registration())
        .await
        .expect_err("registration fails");

    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn register_does_not_touch_store_when_hashing_fails() {
    let mut users = MockUserRepository::new();
    users.expect_create().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(|_| Err(PasswordHasherError::hashing("cost out of range")));

    let service = AccountService::new(Arc::new(users), Arc::new(hasher));
    let err = service
        .register(&registration())
        .await
        .expect_err("registration fails");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn authenticate_returns_user_on_matching_password() {
    let user = alice();
    let expected = user.clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|name| name == "alice")
        .times(1)
        .return_once(move |_| {
            Ok(Some(UserRecord {
                user,
                password_hash: PasswordHash::new("hashed"),
            }))
        });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, hash| password == "pw123" && hash.as_str() == "hashed")
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = AccountService::new(Arc::new(users), Arc::new(hasher));
    let creds = LoginCredentials::try_from_parts("alice", "pw123").expect("valid creds");
    let authenticated = service.authenticate(&creds).await.expect("login succeeds");

    assert_eq!(authenticated, expected);
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn authenticate_failures_are_indistinguishable(#[case] user_exists: bool) {
    let mut users = MockUserRepository::new();
    let record = user_exists.then(|| UserRecord {
        user: alice(),
        password_hash: PasswordHash::new("hashed"),
    });
    users
        .expect_find_by_username()
        .times(1)
        .return_once(move |_| Ok(record));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::new("decoy")));
    hasher.expect_verify().times(1).returning(|_, _| Ok(false));

    let service = AccountService::new(Arc::new(users), Arc::new(hasher));
    let creds = LoginCredentials::try_from_parts("alice", "wrong").expect("valid creds");
    let err = service.authenticate(&creds).await.expect_err("login fails");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn unknown_users_still_pay_for_a_verification() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(2)
        .returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("decoy")));
    hasher
        .expect_verify()
        .withf(|password, hash| password == "pw123" && hash.as_str() == "decoy")
        .times(2)
        .returning(|_, _| Ok(true));

    let service = AccountService::new(Arc::new(users), Arc::new(hasher));
    let creds = LoginCredentials::try_from_parts("mallory", "pw123").expect("valid creds");
    for _ in 0..2 {
        let err = service.authenticate(&creds).await.expect_err("login fails");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), LOGIN_FAILED_MESSAGE);
    }
}
