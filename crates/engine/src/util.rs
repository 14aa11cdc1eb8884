//! Internal helpers for field validation.
//!
//! These utilities are **not** part of the public API. They centralize the
//! field rules so both services enforce the same bounds.

use crate::{FieldError, Money, ResultEngine, Rule};

pub(crate) const NAME_MIN_CHARS: usize = 2;
pub(crate) const NAME_MAX_CHARS: usize = 50;
pub(crate) const DESCRIPTION_MAX_CHARS: usize = 255;

/// Trim a category name and check its length bounds.
pub(crate) fn normalize_category_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    if chars < NAME_MIN_CHARS {
        return Err(FieldError::new(
            "name",
            Rule::MinLength,
            format!("name must be at least {NAME_MIN_CHARS} characters"),
        )
        .into());
    }
    if chars > NAME_MAX_CHARS {
        return Err(FieldError::new(
            "name",
            Rule::MaxLength,
            format!("name must not exceed {NAME_MAX_CHARS} characters"),
        )
        .into());
    }
    Ok(trimmed.to_string())
}

/// Check the optional free-text description. The value is kept verbatim.
pub(crate) fn validate_description(value: &str) -> ResultEngine<()> {
    if value.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(FieldError::new(
            "description",
            Rule::MaxLength,
            format!("description must not exceed {DESCRIPTION_MAX_CHARS} characters"),
        )
        .into());
    }
    Ok(())
}

/// Drop empty list filters, an empty string means "no filter".
pub(crate) fn normalize_filter(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(ToString::to_string)
}

/// Convert a wire amount and require it to be strictly positive.
pub(crate) fn positive_amount(value: f64) -> ResultEngine<Money> {
    let amount = Money::from_major(value)?;
    if !amount.is_positive() {
        return Err(FieldError::new(
            "amount",
            Rule::GreaterThanZero,
            "amount must be greater than 0",
        )
        .into());
    }
    Ok(amount)
}
