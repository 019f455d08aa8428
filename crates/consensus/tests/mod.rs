//! Consensus the Neo protocol Compatibility Test Suite
//!
//! This module contains comprehensive tests that ensure full compatibility
//! with the the reference.Consensus implementation.

mod dbft_tests;
