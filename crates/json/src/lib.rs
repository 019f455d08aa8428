//! # Neo JSON Library
//!
//! A comprehensive JSON library for the Neo blockchain ecosystem, providing
//! high-performance JSON parsing, manipulation, and querying capabilities.
//!
//! This library is designed to be fully compatible with the the reference.Json library,
//! providing the same API and functionality while leveraging Rust's performance
//! and safety guarantees.
//!
//! ## Features
//!
//! - **Complete JSON Support**: Full support for all JSON data types
//! - **JSON Path Queries**: Advanced JSON path expressions for data extraction
//! - **High Performance**: Optimized for blockchain data processing
//! - **Memory Efficient**: Minimal memory footprint with zero-copy operations where possible
//! - **Thread Safe**: All types are thread-safe and can be shared across threads
//! - **Neo Compatibility**: Full compatibility with Neo blockchain JSON structures
//!
//! ## Quick Start
//!
//! ```rust
//! use neo_json::*;
//!
//! // Create a JSON object
//! let mut obj = OrderedDictionary::new();
//! obj.insert("name".to_string(), Some(JToken::String("Neo".to_string())));
//! obj.insert("version".to_string(), Some(JToken::Number(3.0)));
//!
//! let json = JToken::Object(obj);
//!
//! // Query with JSON path
//! let tokens = JPathToken::parse("$.name").expect("Operation failed");
//! let results = JPathToken::evaluate(&tokens, &json).expect("Operation failed");
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: O(n) time complexity for JSON parsing
//! - **Path Queries**: O(log n) average case for property access
//! - **Memory**: Minimal allocations with efficient string interning
//! - **Throughput**: Optimized for high-frequency blockchain operations

// Remove unused imports

pub mod error;
pub mod jarray;
pub mod jboolean;
pub mod jcontainer;
pub mod jnumber;
pub mod jobject;
pub mod jpath;
pub mod jstring;
pub mod jtoken;
pub mod ordered_dictionary;
pub mod utility;

pub use error::{JsonError, JsonResult};
pub use jarray::JArray;
pub use jboolean::JBoolean;
pub use jcontainer::JContainer;
pub use jnumber::JNumber;
pub use jobject::JObject;
pub use jpath::{JPathToken, JPathTokenType};
pub use jstring::JString;
pub use jtoken::JToken;
pub use ordered_dictionary::OrderedDictionary;
