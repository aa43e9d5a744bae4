mod common;

use common::{registration, test_pool};
use waste_exchange::db::{Role, UserRepository};
use waste_exchange::error::{is_unique_violation, AppError};
use waste_exchange::services::accounts;

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let pool = test_pool().await;

    let user = accounts::register(&pool, registration("alice", "buyer", Some(" metal, Paper ")))
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::Buyer);
    assert_ne!(user.password, "hunter22");
    assert!(user.password.starts_with("$argon2"));
    // Stored raw apart from the outer trim
    assert_eq!(user.waste_types.as_deref(), Some("metal, Paper"));
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let pool = test_pool().await;
    accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();

    let mut again = registration("alice", "seller", None);
    again.email = "other@example.com".to_string();

    let err = accounts::register(&pool, again).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let pool = test_pool().await;
    accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();

    let mut again = registration("bob", "buyer", None);
    again.email = "alice@example.com".to_string();

    let err = accounts::register(&pool, again).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_register_rejects_missing_or_invalid_fields() {
    let pool = test_pool().await;

    let mut blank_name = registration("x", "buyer", None);
    blank_name.username = "   ".to_string();

    let mut blank_password = registration("carol", "buyer", None);
    blank_password.password = String::new();

    let mut bad_email = registration("dave", "buyer", None);
    bad_email.email = "dave.example.com".to_string();

    let bad_role = registration("erin", "admin", None);

    for form in [blank_name, blank_password, bad_email, bad_role] {
        let err = accounts::register(&pool, form).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
    }
}

#[tokio::test]
async fn test_seller_preferences_are_not_stored() {
    let pool = test_pool().await;

    let user = accounts::register(&pool, registration("sam", "seller", Some("metal")))
        .await
        .unwrap();

    assert_eq!(user.role, Role::Seller);
    assert_eq!(user.waste_types, None);
}

#[tokio::test]
async fn test_login_opens_session() {
    let pool = test_pool().await;
    let user = accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();

    let logged_in = accounts::login(&pool, " alice ", "hunter22", 24).await.unwrap();

    assert_eq!(logged_in.user.user_id, user.user_id);
    assert_eq!(logged_in.user.role, Role::Buyer);
    assert_eq!(logged_in.session.user_id, user.user_id);
    assert!(logged_in.session.expires_at > logged_in.session.created_at);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let pool = test_pool().await;
    accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();

    let wrong_password = accounts::login(&pool, "alice", "nope", 24).await.unwrap_err();
    assert!(matches!(wrong_password, AppError::Auth(_)));

    let unknown_user = accounts::login(&pool, "mallory", "hunter22", 24).await.unwrap_err();
    assert!(matches!(unknown_user, AppError::Auth(_)));

    assert_eq!(wrong_password.user_message(), unknown_user.user_message());
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let pool = test_pool().await;
    accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();
    let logged_in = accounts::login(&pool, "alice", "hunter22", 24).await.unwrap();

    let token = logged_in.session.token;
    assert!(waste_exchange::db::SessionRepository::get_user_by_token(&pool, &token)
        .await
        .unwrap()
        .is_some());

    accounts::logout(&pool, &token).await.unwrap();

    assert!(waste_exchange::db::SessionRepository::get_user_by_token(&pool, &token)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_expired_sessions_do_not_resolve() {
    let pool = test_pool().await;
    accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();

    let logged_in = accounts::login(&pool, "alice", "hunter22", 0).await.unwrap();

    assert!(waste_exchange::db::SessionRepository::get_user_by_token(&pool, &logged_in.session.token)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_unique_indexes_reject_racing_account_inserts() {
    let pool = test_pool().await;
    let hash = waste_exchange::crypto::hash_password("hunter22").unwrap();

    UserRepository::create(&pool, "alice", "alice@example.com", &hash, Role::Buyer, None)
        .await
        .unwrap();

    let same_username =
        UserRepository::create(&pool, "alice", "other@example.com", &hash, Role::Seller, None)
            .await
            .unwrap_err();
    let same_email =
        UserRepository::create(&pool, "bob", "alice@example.com", &hash, Role::Buyer, None)
            .await
            .unwrap_err();

    for err in [same_username, same_email] {
        match &err {
            AppError::Database(db_err) => assert!(is_unique_violation(db_err)),
            other => panic!("expected a database error, got {:?}", other),
        }
        assert!(matches!(
            err.map_unique_violation(accounts::account_exists),
            AppError::Conflict(_)
        ));
    }
}

#[tokio::test]
async fn test_oversized_session_expiry_is_rejected() {
    let pool = test_pool().await;
    accounts::register(&pool, registration("alice", "buyer", None)).await.unwrap();

    let err = accounts::login(&pool, "alice", "hunter22", i64::MAX).await.unwrap_err();
    assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
}
