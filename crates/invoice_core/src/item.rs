//! Line item parsing, computation and formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::protocol::LineItem;

use crate::error::ValidationError;

/// Raw text of the five item-entry fields.
#[derive(Debug, Clone, Copy)]
pub struct ItemDraft<'a> {
    pub description: &'a str,
    pub hsn_code: &'a str,
    pub quantity: &'a str,
    pub unit_cost: &'a str,
    pub gst_percent: &'a str,
}

/// Parses a decimal entered in a text field. Surrounding whitespace is ignored;
/// NaN and infinities are rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Two-decimal text used for every stored numeric column.
///
/// Rounds the exact binary value with ties away from zero, and keeps the sign
/// of any negative input even when it rounds to zero. Only `-0` itself prints
/// without a sign.
pub fn format_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    match Decimal::from_f64_retain(magnitude) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{sign}{rounded:.2}")
        }
        None => format!("{sign}{magnitude:.2}"),
    }
}

pub fn line_total(quantity: f64, unit_cost: f64, gst_percent: f64) -> f64 {
    let base_cost = quantity * unit_cost;
    base_cost + base_cost * (gst_percent / 100.0)
}

/// Validates a draft and fixes its numeric columns to two decimals.
pub fn build_line_item(draft: ItemDraft<'_>) -> Result<LineItem, ValidationError> {
    if draft.description.is_empty() || draft.hsn_code.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    let (Some(quantity), Some(unit_cost), Some(gst_percent)) = (
        parse_amount(draft.quantity),
        parse_amount(draft.unit_cost),
        parse_amount(draft.gst_percent),
    ) else {
        return Err(ValidationError::NonNumericField);
    };

    Ok(LineItem {
        description: draft.description.to_string(),
        hsn_code: draft.hsn_code.to_string(),
        quantity: format_amount(quantity),
        unit_cost: format_amount(unit_cost),
        gst_percent: format_amount(gst_percent),
        total_cost: format_amount(line_total(quantity, unit_cost, gst_percent)),
    })
}
