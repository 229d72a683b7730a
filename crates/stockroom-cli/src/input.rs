//! Parsing of interactive input.
//!
//! Everything typed at a prompt is raw text until it passes through one of
//! these functions. Malformed values become an [`InputError`] that the
//! controller reports before re-prompting.

use std::io;

use stockroom_core::{FieldError, ProductField, ProductUpdate};
use thiserror::Error;

/// Keyword ending the field loop of the update command.
pub const DONE: &str = "done";

/// Errors raised while reading or parsing interactive input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The menu selection does not name a command of the current menu.
    #[error("Invalid choice. Please try again.")]
    InvalidMenuChoice(String),

    /// A value could not be parsed.
    #[error("Invalid {field} '{value}': {reason}.")]
    Parse {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// An update named a field that does not exist.
    #[error("{0}")]
    UnknownField(#[from] FieldError),

    /// The input stream was closed.
    #[error("input closed")]
    Eof,

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl InputError {
    fn parse(field: &'static str, value: &str, reason: &'static str) -> Self {
        InputError::Parse {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

/// Parse a price: a finite, non-negative decimal number.
pub fn parse_price(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    let price: f64 = trimmed
        .parse()
        .map_err(|_| InputError::parse("price", trimmed, "expected a number"))?;

    if !price.is_finite() {
        return Err(InputError::parse("price", trimmed, "must be a finite number"));
    }
    if price < 0.0 {
        return Err(InputError::parse("price", trimmed, "must not be negative"));
    }
    Ok(price)
}

/// Parse a stock quantity: a non-negative whole number.
pub fn parse_quantity(raw: &str) -> Result<u64, InputError> {
    let trimmed = raw.trim();
    trimmed.parse::<u64>().map_err(|_| {
        let reason = if trimmed.parse::<i64>().is_ok() {
            "must not be negative"
        } else {
            "expected a whole number"
        };
        InputError::parse("stock quantity", trimmed, reason)
    })
}

/// Parse a signed stock delta.
pub fn parse_delta(raw: &str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::parse("quantity", trimmed, "expected a whole number"))
}

/// Parse a field name for the update loop. `done` ends the loop.
pub fn parse_field(raw: &str) -> Result<Option<ProductField>, InputError> {
    let trimmed = raw.trim();
    if trimmed == DONE {
        return Ok(None);
    }
    Ok(Some(trimmed.parse()?))
}

/// Parse `raw` according to `field` and store it in `update`.
pub fn set_field(update: &mut ProductUpdate, field: ProductField, raw: &str) -> Result<(), InputError> {
    match field {
        ProductField::Name => update.name = Some(raw.to_string()),
        ProductField::Category => update.category = Some(raw.to_string()),
        ProductField::Price => update.price = Some(parse_price(raw)?),
        ProductField::StockQuantity => update.stock_quantity = Some(parse_quantity(raw)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap(), 9.99);
        assert_eq!(parse_price(" 3 ").unwrap(), 3.0);
        assert_eq!(parse_price("0").unwrap(), 0.0);

        for bad in ["abc", "", "-1", "inf", "NaN"] {
            assert!(
                matches!(parse_price(bad), Err(InputError::Parse { field: "price", .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("10").unwrap(), 10);
        assert!(matches!(
            parse_quantity("-3"),
            Err(InputError::Parse { reason: "must not be negative", .. })
        ));
        assert!(matches!(
            parse_quantity("2.5"),
            Err(InputError::Parse { reason: "expected a whole number", .. })
        ));
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("-15").unwrap(), -15);
        assert_eq!(parse_delta("+4").unwrap(), 4);
        assert!(parse_delta("ten").is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let err = parse_delta("ten").unwrap_err();
        assert_eq!(err.to_string(), "Invalid quantity 'ten': expected a whole number.");
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("done").unwrap(), None);
        assert_eq!(parse_field("price").unwrap(), Some(ProductField::Price));
        assert!(matches!(
            parse_field("colour"),
            Err(InputError::UnknownField(_))
        ));
    }

    #[test]
    fn test_set_field() {
        let mut update = ProductUpdate::new();
        set_field(&mut update, ProductField::Name, "Gizmo").unwrap();
        set_field(&mut update, ProductField::StockQuantity, "7").unwrap();
        assert!(set_field(&mut update, ProductField::Price, "cheap").is_err());

        assert_eq!(update, ProductUpdate::new().name("Gizmo").stock_quantity(7));
    }
}
