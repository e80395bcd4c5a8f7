use serde::{Deserialize, Serialize};

pub const SAVE_INVOICE_PATH: &str = "/save_invoice";

/// Name under which the generated document is offered for download.
pub fn document_filename(inv_num: &str) -> String {
    format!("Invoice_{inv_num}.xlsx")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub inv_num: String,
    pub inv_date: String,
    pub cust_name: String,
    pub cust_addr: String,
    pub cust_phone: String,
    pub order_num: String,
    pub order_date: String,
    pub bill_type: String,
    pub cust_gstin: String,
    pub cust_state: String,
}

/// One invoice row. Numeric columns hold two-decimal text fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "hsn")]
    pub hsn_code: String,
    #[serde(rename = "qty")]
    pub quantity: String,
    #[serde(rename = "rate")]
    pub unit_cost: String,
    #[serde(rename = "gst")]
    pub gst_percent: String,
    #[serde(rename = "total")]
    pub total_cost: String,
}

impl LineItem {
    /// Table cells in display order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.description,
            &self.hsn_code,
            &self.quantity,
            &self.unit_cost,
            &self.gst_percent,
            &self.total_cost,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub customer_details: CustomerDetails,
    pub items: Vec<LineItem>,
}
