//! In-memory OTP challenge storage with expiry

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use lid_core::domain::entities::OtpChallenge;
use lid_core::domain::value_objects::PhoneNumber;
use lid_core::services::ChallengeStoreTrait;

/// Challenge store keyed by phone number
///
/// At most one challenge is held per phone number. Expired challenges are
/// never returned and are dropped on read or by [`InMemoryChallengeStore::purge_expired`].
#[derive(Debug, Default)]
pub struct InMemoryChallengeStore {
    challenges: RwLock<HashMap<String, OtpChallenge>>,
}

impl InMemoryChallengeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of challenges held, expired ones included
    pub async fn len(&self) -> usize {
        self.challenges.read().await.len()
    }

    /// Whether the store holds no challenges
    pub async fn is_empty(&self) -> bool {
        self.challenges.read().await.is_empty()
    }

    /// Drop every expired challenge, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut challenges = self.challenges.write().await;
        let before = challenges.len();
        challenges.retain(|_, challenge| !challenge.is_expired_at(now));
        before - challenges.len()
    }
}

#[async_trait]
impl ChallengeStoreTrait for InMemoryChallengeStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<(), String> {
        let key = challenge.phone.as_str().to_string();
        let replaced = self.challenges.write().await.insert(key, challenge);

        if replaced.is_some() {
            tracing::debug!(event = "otp_challenge_replaced", "Replaced live OTP challenge");
        }
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>, String> {
        let mut challenges = self.challenges.write().await;
        let expired = match challenges.get(phone.as_str()) {
            Some(challenge) => challenge.is_expired(),
            None => return Ok(None),
        };

        if expired {
            challenges.remove(phone.as_str());
            return Ok(None);
        }
        Ok(challenges.get(phone.as_str()).cloned())
    }

    async fn remove(&self, phone: &PhoneNumber) -> Result<(), String> {
        self.challenges.write().await.remove(phone.as_str());
        Ok(())
    }
}
