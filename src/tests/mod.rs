//! Crate-level unit tests
//!
//! This module contains unit tests that cut across modules: the request
//! interceptor and the configuration surface.
