use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use snippetbox::snippetbox_core::password::{
    hash_in_background, hash_password, hash_password_with_cost, verify_against_dummy,
    verify_against_dummy_in_background, verify_in_background, verify_password,
};

const COST: u32 = 4;

#[test]
fn test_hash_password_default_cost() {
    let password = "validpass123";
    let hash = hash_password(password).unwrap();

    assert_eq!(hash.len(), 60);
    assert!(hash.starts_with("$2b$12$"));
    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_hash_is_never_the_password() {
    let password = "validpass123";
    let hash = hash_password_with_cost(password, COST).unwrap();

    assert_ne!(hash, password);
    assert!(!hash.contains(password));
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password_with_cost("correctpassword", COST).unwrap();

    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = verify_password("testpassword", "not_a_valid_bcrypt_hash");

    assert!(result.is_err());
}

#[test]
fn test_hash_generates_unique_hashes() {
    let password = "samepassword";
    let hash1 = hash_password_with_cost(password, COST).unwrap();
    let hash2 = hash_password_with_cost(password, COST).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}

#[test]
fn test_hash_unicode_characters() {
    let password = "пароль密码🔒";
    let hash = hash_password_with_cost(password, COST).unwrap();

    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_case_sensitive() {
    let hash = hash_password_with_cost("Password123", COST).unwrap();

    assert!(!verify_password("password123", &hash).unwrap());
    assert!(!verify_password("PASSWORD123", &hash).unwrap());
}

#[test]
fn test_dummy_verification_never_succeeds() {
    assert!(!verify_against_dummy("snippetbox-dummy-password"));
    assert!(!verify_against_dummy(""));
}

#[tokio::test]
async fn test_background_hash_and_verify() {
    let hash = hash_in_background("validpass123", COST).await.unwrap();

    assert!(verify_in_background("validpass123", &hash).await.unwrap());
    assert!(!verify_in_background("wrongpass123", &hash).await.unwrap());
    assert!(verify_in_background("validpass123", "not_a_hash").await.is_err());
    assert!(!verify_against_dummy_in_background("validpass123").await.unwrap());
}

#[tokio::test(flavor = "current_thread")]
async fn test_background_hashing_leaves_runtime_free() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let ticker = tokio::spawn({
        let ticks = ticks.clone();
        async move {
            for _ in 0..1_000_000 {
                ticks.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
            }
        }
    });

    let hash = hash_in_background("validpass123", COST).await.unwrap();
    let seen = ticks.load(Ordering::SeqCst);
    ticker.abort();

    assert!(seen > 0);
    assert!(verify_password("validpass123", &hash).unwrap());
}
