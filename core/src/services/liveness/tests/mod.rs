//! Tests for the liveness capture engine
