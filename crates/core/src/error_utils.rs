use std::fmt::Display;

/// Common error conversion utilities to reduce duplication
pub trait ErrorMapper<T> {
    /// Maps an error to a formatted error with context
    fn map_err_context<E, F>(self, context: F) -> Result<T, E>
    where
        F: FnOnce() -> String,
        E: From<String>;
}

impl<T, E: Display> ErrorMapper<T> for Result<T, E> {
    fn map_err_context<E2, F>(self, context: F) -> Result<T, E2>
    where
        F: FnOnce() -> String,
        E2: From<String>,
    {
        self.map_err(|e| E2::from(format!("{}: {}", context(), e)))
    }
}

/// Macro for consistent error formatting
#[macro_export]
macro_rules! format_err {
    ($msg:expr) => {
        format!($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        format!($fmt, $($arg)*)
    };
}

/// Macro for mapping errors with context
#[macro_export]
macro_rules! map_err_ctx {
    ($result:expr, $context:expr) => {
        $result.map_err(|e| format!("{}: {}", $context, e))
    };
}

/// Helper trait for consistent error conversion
pub trait IntoError<E> {
    fn into_error(self, context: &str) -> E;
}

impl<T: Display> IntoError<String> for T {
    fn into_error(self, context: &str) -> String {
        format!("{context}: {self}")
    }
}
