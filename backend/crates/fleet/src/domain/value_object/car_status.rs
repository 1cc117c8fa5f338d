//! Car Status Value Object
//!
//! Availability of a car. Rentals and service records move a car between
//! these states; an operator may also set it directly on the edit form.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum CarStatus {
    /// Ready to be rented
    #[default]
    Available = 0,

    /// Out on an active rental
    Rented = 1,

    /// In the workshop
    Maintenance = 2,
}

impl CarStatus {
    pub const ALL: [CarStatus; 3] = [Self::Available, Self::Rented, Self::Maintenance];

    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for forms
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
        }
    }

    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Rented => "Rented",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Whether the car is offered on the add-rental form
    #[inline]
    pub const fn is_offered_for_rental(&self) -> bool {
        matches!(self, Self::Available | Self::Maintenance)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Available),
            1 => Some(Self::Rented),
            2 => Some(Self::Maintenance),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "available" => Some(Self::Available),
            "rented" => Some(Self::Rented),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
