//! Code delivery module
//!
//! Delivers issued OTP codes to users. Only a console implementation exists;
//! real SMS providers plug in through `CodeDeliveryTrait`.

pub mod console_delivery;

pub use console_delivery::ConsoleCodeDelivery;
