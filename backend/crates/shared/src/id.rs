//! Common ID Types
//!
//! Type-safe wrappers for database-assigned row identifiers.

use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Generic typed ID wrapper around a `BIGSERIAL` primary key
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type CarId = Id<markers::Car>;
/// let id = CarId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw key
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls so that markers don't need to implement these traits.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

/// Error when parsing an ID from text (form fields, path segments)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier is not a positive integer")]
    Invalid,
}

impl<T> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseIdError::Empty);
        }
        match s.parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self::new(value)),
            _ => Err(ParseIdError::Invalid),
        }
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Car IDs
    pub struct Car;

    /// Marker for Customer IDs
    pub struct Customer;

    /// Marker for Rental IDs
    pub struct Rental;

    /// Marker for ServiceRecord IDs
    pub struct ServiceRecord;
}

/// Type aliases for common IDs
pub type CarId = Id<markers::Car>;
pub type CustomerId = Id<markers::Customer>;
pub type RentalId = Id<markers::Rental>;
pub type ServiceRecordId = Id<markers::ServiceRecord>;
