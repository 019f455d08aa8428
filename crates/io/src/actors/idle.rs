//! Idle actor - matches the reference.IO.Actors.Idle exactly

use std::sync::OnceLock;

/// Idle type matching the reference.IO.Actors.Idle
pub struct Idle;

impl Idle {
    /// Gets the singleton instance
    pub fn instance() -> &'static Idle {
        static INSTANCE: OnceLock<Idle> = OnceLock::new();
        INSTANCE.get_or_init(|| Idle)
    }
}
