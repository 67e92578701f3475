//! Unit tests for the OTP service

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::entities::MAX_ATTEMPTS;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{SendError, VerifyError};
use crate::services::otp::{OtpService, OtpServiceConfig, OtpServiceTrait};

use super::mocks::{MockChallengeStore, MockCodeDelivery};

const PHONE: &str = "+919876543210";

fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::try_from(raw).unwrap()
}

fn fixed_service() -> (
    OtpService<MockChallengeStore, MockCodeDelivery>,
    Arc<MockChallengeStore>,
    Arc<MockCodeDelivery>,
) {
    let store = Arc::new(MockChallengeStore::new(false));
    let delivery = Arc::new(MockCodeDelivery::new(false));
    let service = OtpService::new(store.clone(), delivery.clone(), OtpServiceConfig::immediate());
    (service, store, delivery)
}

fn issued_service() -> (
    OtpService<MockChallengeStore, MockCodeDelivery>,
    Arc<MockChallengeStore>,
    Arc<MockCodeDelivery>,
) {
    let store = Arc::new(MockChallengeStore::new(false));
    let delivery = Arc::new(MockCodeDelivery::new(false));
    let config = OtpServiceConfig::immediate().with_issued_challenges();
    let service = OtpService::new(store.clone(), delivery.clone(), config);
    (service, store, delivery)
}

#[tokio::test]
async fn test_send_records_challenge_without_delivery_in_fixed_mode() {
    let (service, store, delivery) = fixed_service();

    service.send_code(&phone(PHONE)).await.unwrap();

    let challenge = store.stored(PHONE).expect("challenge recorded");
    assert_eq!(challenge.code, "123456");
    assert_eq!(delivery.sent_count(), 0);
}

#[tokio::test]
async fn test_send_rejects_malformed_phone() {
    let (service, store, _) = fixed_service();
    let malformed = PhoneNumber::from_validated("9876543210".to_string());

    let result = service.send_code(&malformed).await;

    assert_eq!(result, Err(SendError::InvalidFormat));
    assert!(store.stored("9876543210").is_none());
}

#[tokio::test]
async fn test_send_storage_failure_is_transport_error() {
    let store = Arc::new(MockChallengeStore::new(true));
    let delivery = Arc::new(MockCodeDelivery::new(false));
    let service = OtpService::new(store, delivery, OtpServiceConfig::immediate());

    let result = service.send_code(&phone(PHONE)).await;

    assert!(matches!(result, Err(SendError::Transport { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_send_waits_for_simulated_round_trip() {
    let store = Arc::new(MockChallengeStore::new(false));
    let delivery = Arc::new(MockCodeDelivery::new(false));
    let service = OtpService::new(store, delivery, OtpServiceConfig::default());

    let started = Instant::now();
    service.send_code(&phone(PHONE)).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_verify_waits_for_simulated_round_trip() {
    let store = Arc::new(MockChallengeStore::new(false));
    let delivery = Arc::new(MockCodeDelivery::new(false));
    let service = OtpService::new(store, delivery, OtpServiceConfig::default());

    let started = Instant::now();
    service.verify_code(&phone(PHONE), "123456").await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test]
async fn test_fixed_code_verifies_for_any_valid_phone() {
    let (service, _, _) = fixed_service();

    for raw in ["+919876543210", "+916000000000", "+918123456789"] {
        let token = service.verify_code(&phone(raw), "123456").await.unwrap();
        assert!(token.is_recognized());
        assert!(token.as_str().starts_with(&format!("fake-jwt-for-{}-", raw)));
    }
}

#[tokio::test]
async fn test_fixed_code_verifies_without_prior_send() {
    let (service, store, _) = fixed_service();

    let result = service.verify_code(&phone(PHONE), "123456").await;

    assert!(result.is_ok());
    assert!(store.stored(PHONE).is_none());
}

#[tokio::test]
async fn test_fixed_mode_rejects_other_codes() {
    let (service, _, _) = fixed_service();
    service.send_code(&phone(PHONE)).await.unwrap();

    for code in ["000000", "654321", "12345", "1234567", ""] {
        assert_eq!(
            service.verify_code(&phone(PHONE), code).await,
            Err(VerifyError::InvalidOrExpired),
            "{code:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_fixed_mode_verify_clears_recorded_challenge() {
    let (service, store, _) = fixed_service();
    service.send_code(&phone(PHONE)).await.unwrap();

    service.verify_code(&phone(PHONE), "123456").await.unwrap();

    assert!(store.stored(PHONE).is_none());
}

#[tokio::test]
async fn test_token_suffix_is_epoch_millis() {
    let (service, _, _) = fixed_service();
    let before = chrono::Utc::now().timestamp_millis();

    let token = service.verify_code(&phone(PHONE), "123456").await.unwrap();

    let after = chrono::Utc::now().timestamp_millis();
    let millis: i64 = token
        .as_str()
        .trim_start_matches("fake-jwt-for-+919876543210-")
        .parse()
        .unwrap();
    assert!(millis >= before && millis <= after);
}

#[tokio::test]
async fn test_issued_mode_delivers_and_verifies_code() {
    let (service, store, delivery) = issued_service();

    service.send_code(&phone(PHONE)).await.unwrap();
    let code = delivery.get_sent_code(PHONE).expect("code delivered");
    assert_eq!(store.stored(PHONE).unwrap().code, code);

    let token = service.verify_code(&phone(PHONE), &code).await.unwrap();

    assert!(token.as_str().starts_with("fake-jwt-for-+919876543210-"));
    assert!(store.stored(PHONE).is_none());
}

#[tokio::test]
async fn test_issued_mode_wrong_code_keeps_challenge() {
    let (service, store, delivery) = issued_service();
    service.send_code(&phone(PHONE)).await.unwrap();
    let code = delivery.get_sent_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    assert_eq!(
        service.verify_code(&phone(PHONE), wrong).await,
        Err(VerifyError::InvalidOrExpired)
    );
    assert_eq!(store.stored(PHONE).unwrap().attempts, 1);

    assert!(service.verify_code(&phone(PHONE), &code).await.is_ok());
}

#[tokio::test]
async fn test_issued_mode_exhausted_attempts_invalidate_challenge() {
    let (service, store, delivery) = issued_service();
    service.send_code(&phone(PHONE)).await.unwrap();
    let code = delivery.get_sent_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..MAX_ATTEMPTS {
        assert!(service.verify_code(&phone(PHONE), wrong).await.is_err());
    }

    assert!(store.stored(PHONE).is_none());
    assert_eq!(
        service.verify_code(&phone(PHONE), &code).await,
        Err(VerifyError::InvalidOrExpired)
    );
}

#[tokio::test]
async fn test_issued_mode_expired_challenge_is_rejected() {
    let (service, store, delivery) = issued_service();
    service.send_code(&phone(PHONE)).await.unwrap();
    let code = delivery.get_sent_code(PHONE).unwrap();
    store.expire(PHONE);

    assert_eq!(
        service.verify_code(&phone(PHONE), &code).await,
        Err(VerifyError::InvalidOrExpired)
    );
    assert!(store.stored(PHONE).is_none());
}

#[tokio::test]
async fn test_issued_mode_rejects_fixed_code_without_challenge() {
    let (service, _, _) = issued_service();

    assert_eq!(
        service.verify_code(&phone(PHONE), "123456").await,
        Err(VerifyError::InvalidOrExpired)
    );
}

#[tokio::test]
async fn test_issued_mode_resend_replaces_challenge() {
    let (service, store, _) = issued_service();

    service.send_code(&phone(PHONE)).await.unwrap();
    let first = store.stored(PHONE).unwrap().id;
    service.send_code(&phone(PHONE)).await.unwrap();
    let second = store.stored(PHONE).unwrap();

    assert_ne!(first, second.id);
    assert_eq!(second.attempts, 0);
}

#[tokio::test]
async fn test_issued_mode_delivery_failure_discards_challenge() {
    let store = Arc::new(MockChallengeStore::new(false));
    let delivery = Arc::new(MockCodeDelivery::new(true));
    let config = OtpServiceConfig::immediate().with_issued_challenges();
    let service = OtpService::new(store.clone(), delivery, config);

    let result = service.send_code(&phone(PHONE)).await;

    assert!(matches!(result, Err(SendError::Transport { .. })));
    assert!(store.stored(PHONE).is_none());
}

#[tokio::test]
async fn test_trait_object_delegates_to_service() {
    let (service, _, _) = fixed_service();
    let otp: Arc<dyn OtpServiceTrait> = Arc::new(service);

    otp.send(&phone(PHONE)).await.unwrap();
    let token = otp.verify(&phone(PHONE), "123456").await.unwrap();

    assert!(token.is_recognized());
}
