use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! field_ids {
    ($name:ident { $($variant:ident => $id:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $id)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

field_ids!(CustomerField {
    InvoiceNumber => "inv-num",
    InvoiceDate => "inv-date",
    CustomerName => "cust-name",
    CustomerAddress => "cust-addr",
    CustomerPhone => "cust-phone",
    OrderNumber => "order-num",
    OrderDate => "order-date",
    BillType => "bill-type",
    CustomerGstin => "cust-gstin",
    CustomerState => "cust-state",
});

field_ids!(ItemField {
    Description => "item-desc",
    HsnCode => "item-hsn",
    Quantity => "item-qty",
    UnitCost => "item-cost",
    GstPercent => "item-gst",
});

field_ids!(FormAction {
    AddItem => "add-item-btn",
    SaveInvoice => "save-invoice-btn",
    ClearAll => "clear-all-btn",
});

/// Any input element the controller reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Customer(CustomerField),
    Item(ItemField),
}

impl FieldId {
    pub fn all() -> impl Iterator<Item = FieldId> {
        CustomerField::ALL
            .iter()
            .copied()
            .map(FieldId::Customer)
            .chain(ItemField::ALL.iter().copied().map(FieldId::Item))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Customer(field) => field.as_str(),
            FieldId::Item(field) => field.as_str(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CustomerField> for FieldId {
    fn from(value: CustomerField) -> Self {
        FieldId::Customer(value)
    }
}

impl From<ItemField> for FieldId {
    fn from(value: ItemField) -> Self {
        FieldId::Item(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field identifier '{0}'")]
pub struct UnknownIdentifier(pub String);

impl FromStr for FieldId {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FieldId::all()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownIdentifier(s.to_string()))
    }
}

impl FromStr for FormAction {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FormAction::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownIdentifier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_identifier_parses_back() {
        for field in FieldId::all() {
            assert_eq!(field.as_str().parse::<FieldId>().expect("parse"), field);
        }
        assert_eq!(FieldId::all().count(), 15);
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = "inv-number".parse::<FieldId>().expect_err("should fail");
        assert_eq!(err.0, "inv-number");
    }

    #[test]
    fn actions_use_button_identifiers() {
        assert_eq!(
            "save-invoice-btn".parse::<FormAction>().expect("action"),
            FormAction::SaveInvoice
        );
        assert_eq!(FormAction::ClearAll.to_string(), "clear-all-btn");
    }
}
