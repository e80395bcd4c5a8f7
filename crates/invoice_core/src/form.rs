//! In-memory model of the form's input fields.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::{
    domain::{CustomerField, FieldId, ItemField},
    protocol::CustomerDetails,
};

use crate::item::ItemDraft;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<FieldId, String>,
}

impl FormFields {
    pub fn get(&self, field: impl Into<FieldId>) -> &str {
        self.values
            .get(&field.into())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, field: impl Into<FieldId>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn clear(&mut self, field: impl Into<FieldId>) {
        self.values.remove(&field.into());
    }

    pub fn set_dates(&mut self, today: NaiveDate) {
        let today = today.format(DATE_FORMAT).to_string();
        self.set(CustomerField::InvoiceDate, today.clone());
        self.set(CustomerField::OrderDate, today);
    }

    pub fn clear_item_entry(&mut self) {
        for field in ItemField::ALL {
            self.clear(*field);
        }
    }

    pub fn clear_customer(&mut self) {
        for field in CustomerField::ALL {
            self.clear(*field);
        }
    }

    pub fn item_draft(&self) -> ItemDraft<'_> {
        ItemDraft {
            description: self.get(ItemField::Description),
            hsn_code: self.get(ItemField::HsnCode),
            quantity: self.get(ItemField::Quantity),
            unit_cost: self.get(ItemField::UnitCost),
            gst_percent: self.get(ItemField::GstPercent),
        }
    }

    /// Snapshot of the ten customer fields as they read right now.
    pub fn customer_details(&self) -> CustomerDetails {
        let read = |field: CustomerField| self.get(field).to_string();
        CustomerDetails {
            inv_num: read(CustomerField::InvoiceNumber),
            inv_date: read(CustomerField::InvoiceDate),
            cust_name: read(CustomerField::CustomerName),
            cust_addr: read(CustomerField::CustomerAddress),
            cust_phone: read(CustomerField::CustomerPhone),
            order_num: read(CustomerField::OrderNumber),
            order_date: read(CustomerField::OrderDate),
            bill_type: read(CustomerField::BillType),
            cust_gstin: read(CustomerField::CustomerGstin),
            cust_state: read(CustomerField::CustomerState),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_read_as_empty() {
        let form = FormFields::default();
        assert_eq!(form.get(CustomerField::InvoiceNumber), "");
        assert_eq!(form.customer_details(), CustomerDetails::default());
    }

    #[test]
    fn dates_use_iso_format() {
        let mut form = FormFields::default();
        form.set_dates(NaiveDate::from_ymd_opt(2026, 3, 7).expect("date"));
        assert_eq!(form.get(CustomerField::InvoiceDate), "2026-03-07");
        assert_eq!(form.get(CustomerField::OrderDate), "2026-03-07");
    }

    #[test]
    fn customer_details_map_each_field() {
        let mut form = FormFields::default();
        form.set(CustomerField::InvoiceNumber, "INV-1");
        form.set(CustomerField::CustomerGstin, "29ABCDE1234F1Z5");
        form.set(ItemField::Description, "not a customer field");

        let details = form.customer_details();
        assert_eq!(details.inv_num, "INV-1");
        assert_eq!(details.cust_gstin, "29ABCDE1234F1Z5");
        assert_eq!(details.cust_name, "");
    }
}
