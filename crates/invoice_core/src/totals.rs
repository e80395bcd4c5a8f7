//! Aggregate amounts across the stored items.

use shared::protocol::LineItem;

use crate::item::{format_amount, parse_amount};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceTotals {
    pub taxable_amount: f64,
    pub total_cgst_amount: f64,
    pub total_sgst_amount: f64,
    pub total_invoice_amount: f64,
}

impl InvoiceTotals {
    /// Sums the stored two-decimal columns. GST is split evenly into its
    /// central and state halves.
    pub fn from_items(items: &[LineItem]) -> Self {
        items.iter().fold(Self::default(), |mut totals, item| {
            let quantity = parse_amount(&item.quantity).unwrap_or_default();
            let unit_cost = parse_amount(&item.unit_cost).unwrap_or_default();
            let gst_percent = parse_amount(&item.gst_percent).unwrap_or_default();
            let base_cost = quantity * unit_cost;
            let half_tax = base_cost * ((gst_percent / 2.0) / 100.0);

            totals.taxable_amount += base_cost;
            totals.total_cgst_amount += half_tax;
            totals.total_sgst_amount += half_tax;
            totals.total_invoice_amount += parse_amount(&item.total_cost).unwrap_or_default();
            totals
        })
    }

    pub fn summary_line(&self) -> String {
        format!(
            "taxable {}  cgst {}  sgst {}  total {}",
            format_amount(self.taxable_amount),
            format_amount(self.total_cgst_amount),
            format_amount(self.total_sgst_amount),
            format_amount(self.total_invoice_amount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{build_line_item, ItemDraft};

    fn item(qty: &str, cost: &str, gst: &str) -> LineItem {
        build_line_item(ItemDraft {
            description: "d",
            hsn_code: "h",
            quantity: qty,
            unit_cost: cost,
            gst_percent: gst,
        })
        .expect("item")
    }

    #[test]
    fn empty_list_has_zero_totals() {
        assert_eq!(InvoiceTotals::from_items(&[]), InvoiceTotals::default());
    }

    #[test]
    fn gst_is_split_into_equal_halves() {
        let totals = InvoiceTotals::from_items(&[item("2", "100", "18"), item("1", "50", "12")]);
        assert!((totals.taxable_amount - 250.0).abs() < 1e-9);
        assert!((totals.total_cgst_amount - 21.0).abs() < 1e-9);
        assert_eq!(totals.total_cgst_amount, totals.total_sgst_amount);
        assert!((totals.total_invoice_amount - 292.0).abs() < 1e-9);
        assert_eq!(
            totals.summary_line(),
            "taxable 250.00  cgst 21.00  sgst 21.00  total 292.00"
        );
    }
}
