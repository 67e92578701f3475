//! Tests for step and flow error types

mod step_error_tests;
