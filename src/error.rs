//! Structured error handling for gymfis.
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured error responses (JSON-friendly)
//! - Context preservation and resolution hints
//!
//! # Error Categories
//!
//! - `Config` (1xxx) - invalid engine configuration, fatal at construction
//! - `Validation` (2xxx) - crisp inputs outside their declared bounds
//! - `Inference` (3xxx) - degenerate inference conditions
//! - `Internal` (9xxx) - unexpected states
//!
//! Inference-time failures are normally recovered locally and carried in
//! the result value's `error` field rather than returned as `Err`; the
//! `Err` path is reserved for construction and configuration problems.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::terms::VariableId;

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Config errors (1xxx)
    /// Generic configuration error
    ConfigError = 1000,
    /// Unknown membership-function family
    UnknownMfFamily = 1001,
    /// Universe bounds or step are not a valid discretization
    InvalidUniverse = 1002,
    /// A variable's terms leave part of its universe uncovered
    CoverageGap = 1003,
    /// Configuration file not found
    ConfigNotFound = 1004,
    /// Invalid configuration syntax
    InvalidConfigSyntax = 1005,
    /// Invalid configuration value
    InvalidConfigValue = 1006,

    // Validation errors (2xxx)
    /// Generic validation error
    ValidationError = 2000,
    /// Input outside its variable's declared range
    OutOfRange = 2001,
    /// Input is NaN or infinite
    NotFinite = 2002,

    // Inference errors (3xxx)
    /// Generic inference error
    InferenceError = 3000,
    /// No rule contributed to an output variable
    DegenerateAggregation = 3001,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::UnknownMfFamily => "Unknown membership-function family",
            ErrorCode::InvalidUniverse => "Invalid universe discretization",
            ErrorCode::CoverageGap => "Universe coverage gap",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",
            ErrorCode::ValidationError => "Validation error",
            ErrorCode::OutOfRange => "Input out of range",
            ErrorCode::NotFinite => "Input not finite",
            ErrorCode::InferenceError => "Inference error",
            ErrorCode::DegenerateAggregation => "Degenerate aggregation",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Whether this code is fatal at engine construction time.
    pub fn is_config(&self) -> bool {
        (1000..2000).contains(&self.code())
    }

    pub fn is_validation(&self) -> bool {
        (2000..3000).contains(&self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for gymfis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FisError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional key-value context
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, String>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FisError {
    /// Create a new error with a code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: HashMap::new(),
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create a generic configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Create an unknown-family error.
    pub fn unknown_family(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownMfFamily,
            format!("Unknown membership-function family '{}'", name),
        )
        .with_hint("Available families: triangular, gaussian, bell, sigmoid")
    }

    /// Create a generic validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Create an out-of-range input error.
    pub fn out_of_range(id: VariableId, value: f64, min: f64, max: f64) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("{}={} outside [{}, {}]", id, value, min, max),
        )
        .with_context("variable", id.identifier())
    }

    /// Create a non-finite input error.
    pub fn not_finite(id: VariableId, value: f64) -> Self {
        Self::new(
            ErrorCode::NotFinite,
            format!("{}={} is not a finite number", id, value),
        )
        .with_context("variable", id.identifier())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Add context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Add a hint for resolving the error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"INTERNAL_ERROR","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for FisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for FisError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<std::io::Error> for FisError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::ConfigNotFound,
            _ => ErrorCode::InternalError,
        };
        FisError::new(code, err.to_string())
    }
}

impl From<toml::de::Error> for FisError {
    fn from(err: toml::de::Error) -> Self {
        FisError::config(err.to_string()).with_code(ErrorCode::InvalidConfigSyntax)
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using FisError.
pub type FisResult<T> = Result<T, FisError>;

// ============================================================================
// Error response for presentation layers
// ============================================================================

/// Structured error shape for presentation layers that render warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator
    pub error: bool,
    /// Error code (string form)
    pub code: String,
    /// Numeric error code
    pub code_num: u32,
    /// Error message
    pub message: String,
    /// Additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
    /// Hint for resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&FisError> for ErrorResponse {
    fn from(err: &FisError) -> Self {
        Self {
            error: true,
            code: format!("{:?}", err.code),
            code_num: err.code.code(),
            message: err.message.clone(),
            details: if err.context.is_empty() {
                None
            } else {
                Some(err.context.clone())
            },
            hint: err.hint.clone(),
        }
    }
}

impl From<FisError> for ErrorResponse {
    fn from(err: FisError) -> Self {
        Self::from(&err)
    }
}
