//! Test module for notitray-core
//!
//! This module contains tests for:
//! - State transitions of the notification store
//! - Coordinator lifecycles (pending, success, failure, resolution order)
//! - Configuration loading and defaults

mod store_tests;
