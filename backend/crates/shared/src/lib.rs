//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the smallest core of vocabulary shared by every
//! backend crate:
//! - Common error types and result aliases
//! - Typed row identifiers
//!
//! Only things with a consistent meaning across all domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
