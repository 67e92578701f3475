//! Cache module for OTP challenge storage
//!
//! Challenges live in process memory; a restart discards them, which at
//! worst makes a user request a new code.

pub mod challenge_store;

pub use challenge_store::InMemoryChallengeStore;
