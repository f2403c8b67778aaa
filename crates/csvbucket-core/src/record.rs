//! Person Record
//!
//! A `Record` is one validated person entry. It only exists in memory for the
//! duration of a write request, after which it lives on as a row of the
//! stored document.
//!
//! ## Constraints
//! - **nombre**: at least one character
//! - **edad**: integer in `0..=150`
//! - **altura**: real number strictly greater than zero
//!
//! The only way to obtain a `Record` is [`Record::new`], so holding one means
//! the constraints already passed.

use serde::Serialize;

use crate::error::{FieldError, ValidationError};

/// Oldest accepted age.
pub const MAX_EDAD: i64 = 150;

/// A validated person entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    nombre: String,
    edad: i64,
    altura: f64,
}

impl Record {
    /// Validate the candidate fields and build a record.
    ///
    /// All failing fields are reported together.
    pub fn new(nombre: impl Into<String>, edad: i64, altura: f64) -> Result<Self, ValidationError> {
        let nombre = nombre.into();
        let mut errors = Vec::new();

        if nombre.chars().count() < 1 {
            errors.push(FieldError::new(
                "nombre",
                "String should have at least 1 character",
                "string_too_short",
            ));
        }

        if edad < 0 {
            errors.push(FieldError::new(
                "edad",
                "Input should be greater than or equal to 0",
                "greater_than_equal",
            ));
        } else if edad > MAX_EDAD {
            errors.push(FieldError::new(
                "edad",
                format!("Input should be less than or equal to {}", MAX_EDAD),
                "less_than_equal",
            ));
        }

        // NaN fails this comparison too
        if !(altura > 0.0) {
            errors.push(FieldError::new(
                "altura",
                "Input should be greater than 0",
                "greater_than",
            ));
        }

        if errors.is_empty() {
            Ok(Self {
                nombre,
                edad,
                altura,
            })
        } else {
            Err(ValidationError { errors })
        }
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn edad(&self) -> i64 {
        self.edad
    }

    pub fn altura(&self) -> f64 {
        self.altura
    }

    /// Canonical text form of `edad` as written to the document.
    pub fn edad_text(&self) -> String {
        self.edad().to_string()
    }

    /// Canonical text form of `altura`, see [`decimal_text`].
    pub fn altura_text(&self) -> String {
        decimal_text(self.altura())
    }
}

/// Shortest round-trip text of `value`.
///
/// Decimal exponents in `-4..16` print positionally with at least one
/// fractional digit (`1.8`, `2.0`, `0.0001`). Anything outside that range uses
/// a signed, two-digit exponent (`1e-05`, `1e+16`, `1.2345678901234568e+17`).
pub fn decimal_text(value: f64) -> String {
    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        // inf and NaN carry no exponent
        return scientific;
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };

    if (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
    }
}
