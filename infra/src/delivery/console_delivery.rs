//! Console Code Delivery Implementation
//!
//! Development implementation of code delivery. Codes are printed to the
//! console instead of being sent.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use lid_core::domain::value_objects::PhoneNumber;
use lid_core::services::CodeDeliveryTrait;

use crate::InfrastructureError;

/// Console code delivery for development and testing
///
/// This implementation:
/// - Prints the code to the console
/// - Generates console message IDs
/// - Tracks message count for testing
#[derive(Clone)]
pub struct ConsoleCodeDelivery {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl ConsoleCodeDelivery {
    /// Create a new console delivery
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a console delivery with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    /// Message text carrying a code
    pub fn format_message(code: &str) -> String {
        format!("Your LivenessID verification code is {}. Do not share it with anyone.", code)
    }

    /// Send a message to a phone number
    pub async fn send_message(
        &self,
        phone: &PhoneNumber,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure {
            warn!(
                phone = %phone.masked(),
                "Console delivery simulating failure"
            );
            return Err(InfrastructureError::Delivery(
                "Simulated delivery failure".to_string(),
            ));
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("CONSOLE CODE DELIVERY - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone.masked());
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "code_delivery",
            provider = "console",
            phone = %phone.masked(),
            message_id = %message_id,
            message_length = message.len(),
            "Code delivered (console)"
        );

        Ok(message_id)
    }
}

impl Default for ConsoleCodeDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeDeliveryTrait for ConsoleCodeDelivery {
    async fn deliver_code(&self, phone: &PhoneNumber, code: &str) -> Result<String, String> {
        self.send_message(phone, &Self::format_message(code))
            .await
            .map_err(|e| e.to_string())
    }
}
