//! Tests for the upload service
