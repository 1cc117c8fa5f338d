//! View Models
//!
//! Serializable values handed to the templates. Templates see nothing else.

use std::collections::BTreeMap;

use platform::flash::Flash;
use serde::Serialize;

use crate::domain::entity::{car::Car, customer::Customer};
use crate::domain::validation::ValidationErrors;
use crate::domain::value_object::{car_status::CarStatus, rental_status::RentalStatus};

/// Wraps the page-specific content with layout data
#[derive(Debug, Serialize)]
pub struct PageView<T: Serialize> {
    pub title: String,
    /// Active navigation entry
    pub nav: &'static str,
    pub flash: Option<FlashView>,
    #[serde(flatten)]
    pub content: T,
}

impl<T: Serialize> PageView<T> {
    pub fn new(title: impl Into<String>, nav: &'static str, content: T) -> Self {
        Self {
            title: title.into(),
            nav,
            flash: None,
            content,
        }
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> Self {
        self.flash = flash.map(FlashView::from);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashView {
    pub level: &'static str,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            level: flash.level.as_str(),
            message: flash.message,
        }
    }
}

/// One `<option>` of a select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    fn new(value: String, label: String, current: &str) -> Self {
        let selected = value == current;
        Self {
            value,
            label,
            selected,
        }
    }

    pub fn cars(cars: &[Car], current: &str) -> Vec<Self> {
        cars.iter()
            .map(|car| {
                Self::new(
                    car.id.to_string(),
                    format!(
                        "{} ({}) - {}/day",
                        car.label(),
                        car.status.label(),
                        car.daily_rate
                    ),
                    current,
                )
            })
            .collect()
    }

    pub fn customers(customers: &[Customer], current: &str) -> Vec<Self> {
        customers
            .iter()
            .map(|c| Self::new(c.id.to_string(), c.name.clone(), current))
            .collect()
    }

    pub fn car_statuses(current: &str) -> Vec<Self> {
        CarStatus::ALL
            .iter()
            .map(|s| Self::new(s.code().to_string(), s.label().to_string(), current))
            .collect()
    }

    pub fn rental_statuses(current: &str) -> Vec<Self> {
        RentalStatus::ALL
            .iter()
            .map(|s| Self::new(s.code().to_string(), s.label().to_string(), current))
            .collect()
    }
}

/// Select choices of a form; unused lists stay empty
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormOptions {
    pub cars: Vec<OptionView>,
    pub customers: Vec<OptionView>,
    pub statuses: Vec<OptionView>,
}

/// Add or edit form, fresh or re-shown with errors
#[derive(Debug, Serialize)]
pub struct FormView<F: Serialize> {
    /// Form target
    pub action: String,
    pub submit_label: &'static str,
    pub form: F,
    /// First message per field
    pub errors: BTreeMap<&'static str, String>,
    pub has_errors: bool,
    pub options: FormOptions,
}

impl<F: Serialize> FormView<F> {
    pub fn new(action: impl Into<String>, submit_label: &'static str, form: F) -> Self {
        Self {
            action: action.into(),
            submit_label,
            form,
            errors: BTreeMap::new(),
            has_errors: false,
            options: FormOptions::default(),
        }
    }

    pub fn with_errors(mut self, errors: &ValidationErrors) -> Self {
        for error in errors.iter() {
            self.errors
                .entry(error.field)
                .or_insert_with(|| error.message.clone());
        }
        self.has_errors = !self.errors.is_empty();
        self
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }
}
