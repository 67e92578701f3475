//! Tests for the verification flow controller
