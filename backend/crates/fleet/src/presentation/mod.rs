//! Presentation Layer
//!
//! HTTP handlers, form DTOs, view models and the template registry.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod view_model;
pub mod views;
