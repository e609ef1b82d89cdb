//! Newtype keys and references.
//!
//! `ProductName` normalizes its input so catalog and cart lookups are
//! case-insensitive; `BookingRef` is an opaque generated booking reference.
//! Using newtypes keeps the two from being mixed up with plain strings at
//! API boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product name, normalized to lowercase.
///
/// Two names that differ only in case compare equal and map to the same
/// catalog or cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Create a normalized product name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_lowercase())
    }

    /// Get the normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProductName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A booking reference (e.g., "BK1A2B3C4D").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRef(String);

impl BookingRef {
    /// Create a reference from an existing string.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Generate a new unique booking reference.
    pub fn generate() -> Self {
        Self(format!("BK{:08X}", generate_token() as u32))
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BookingRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Generate a unique token using timestamp and random bytes.
fn generate_token() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    // Combine timestamp with atomic counter for uniqueness
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    // Also add memory address for extra entropy
    let ptr = Box::new(0u8);
    let addr = &*ptr as *const u8 as u64;

    (timestamp as u64).rotate_left(17) ^ (counter << 32) ^ counter ^ addr
}
