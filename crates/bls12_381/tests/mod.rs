//! BLS12-381 the Neo protocol Compatibility Test Suite
//!
//! This module contains comprehensive tests that ensure full compatibility
//! with the the reference.Cryptography.BLS12_381 implementation.

mod keys_tests;
mod signature_tests;
