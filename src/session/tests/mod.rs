//! Tests for the session core
//!
//! This module contains unit tests for the session components:
//! principal lifecycle, role predicates, persistence, and the service.

mod storage_test;
