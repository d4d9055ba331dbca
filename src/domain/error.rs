//! Domain validation errors.
//!
//! Returned by `try_new` constructors and `validate` methods when an
//! input violates a domain invariant.
//!
//! ```
//! use chrono::NaiveDate;
//! use farewatch::domain::{error::DomainError, SearchWindow};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
//! let result = SearchWindow::try_new("AGP", "UIO", day, day);
//!
//! assert!(matches!(result, Err(DomainError::ReturnNotAfterDeparture { .. })));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The return date must fall strictly after the departure date.
    #[error("return date {return_date} must be after departure date {departure_date}")]
    ReturnNotAfterDeparture {
        departure_date: NaiveDate,
        return_date: NaiveDate,
    },

    /// An airport code was blank.
    #[error("{field} must not be empty")]
    EmptyCode { field: &'static str },

    /// Fares cannot be negative.
    #[error("total price must be non-negative, got {price}")]
    NegativePrice { price: Decimal },

    /// Layover limits must be positive numbers of hours.
    #[error("max layover hours must be positive, got {hours}")]
    InvalidLayover { hours: f64 },
}
