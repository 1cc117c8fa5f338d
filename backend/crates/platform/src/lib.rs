//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie building and parsing
//! - URL-safe Base64 helpers
//! - One-shot flash messages carried in a cookie

pub mod cookie;
pub mod crypto;
pub mod flash;
