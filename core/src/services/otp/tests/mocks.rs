//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::OtpChallenge;
use crate::domain::value_objects::PhoneNumber;
use crate::services::otp::{ChallengeStoreTrait, CodeDeliveryTrait};

pub struct MockChallengeStore {
    pub challenges: Arc<Mutex<HashMap<String, OtpChallenge>>>,
    pub should_fail: bool,
}

impl MockChallengeStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            challenges: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn stored(&self, phone: &str) -> Option<OtpChallenge> {
        self.challenges.lock().unwrap().get(phone).cloned()
    }

    pub fn expire(&self, phone: &str) {
        if let Some(challenge) = self.challenges.lock().unwrap().get_mut(phone) {
            challenge.expires_at = challenge.issued_at;
        }
    }
}

#[async_trait]
impl ChallengeStoreTrait for MockChallengeStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock store failure".to_string());
        }
        self.challenges
            .lock()
            .unwrap()
            .insert(challenge.phone.as_str().to_string(), challenge);
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>, String> {
        if self.should_fail {
            return Err("Mock store failure".to_string());
        }
        Ok(self.challenges.lock().unwrap().get(phone.as_str()).cloned())
    }

    async fn remove(&self, phone: &PhoneNumber) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock store failure".to_string());
        }
        self.challenges.lock().unwrap().remove(phone.as_str());
        Ok(())
    }
}

pub struct MockCodeDelivery {
    pub sent_codes: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockCodeDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(phone).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_codes.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDeliveryTrait for MockCodeDelivery {
    async fn deliver_code(&self, phone: &PhoneNumber, code: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("Mock delivery failure".to_string());
        }
        self.sent_codes
            .lock()
            .unwrap()
            .insert(phone.as_str().to_string(), code.to_string());
        Ok(format!("mock-msg-{}", phone.as_str()))
    }
}
