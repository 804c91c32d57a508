use serde::{Deserialize, Serialize};

/// Invoice identifier, assigned by the record store on first save.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub u64);

impl InvoiceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One billable row, owned by exactly one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Non-negative count, no enforced upper bound.
    pub quantity: u32,
    /// Unit price as a floating-point currency amount. Precision loss beyond
    /// the two-decimal display format is accepted for this scope.
    #[serde(rename = "price")]
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self { description: description.into(), quantity, unit_price }
    }

    /// Derived, never stored: quantity times unit price.
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// One billing document.
///
/// Header strings are unvalidated and rendered verbatim; dates in particular
/// are kept as the stored display strings, never reparsed. The logo is an
/// uninterpreted byte sequence supplied out of band (multipart upload), so it
/// is excluded from the JSON representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<InvoiceId>,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Invoice {
    /// Sum of all line totals, accumulated in the items' given order.
    pub fn subtotal(&self) -> f64 {
        let mut total = 0.0;
        for item in &self.items {
            total += item.line_total();
        }
        total
    }

    /// True when the notes field is present and non-empty.
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Invoice {
        Invoice {
            invoice_number: "INV-001".into(),
            invoice_date: "2025-03-01".into(),
            due_date: "2025-03-16".into(),
            customer_name: "Ada Lovelace".into(),
            customer_address: "12 Analytical Row".into(),
            customer_email: "ada@example.com".into(),
            items: vec![
                LineItem::new("Widget", 2, 9.99),
                LineItem::new("Gadget", 1, 25.00),
            ],
            ..Invoice::default()
        }
    }

    #[test]
    fn line_total_is_quantity_times_price() {
        let item = LineItem::new("Widget", 2, 9.99);
        assert!((item.line_total() - 19.98).abs() < 1e-9);
    }

    #[test]
    fn subtotal_accumulates_in_order() {
        let invoice = sample();
        assert!((invoice.subtotal() - 44.98).abs() < 1e-9);
    }

    #[test]
    fn empty_invoice_subtotal_is_zero() {
        assert_eq!(Invoice::default().subtotal(), 0.0);
    }

    #[test]
    fn notes_must_be_non_empty_to_count() {
        let mut invoice = sample();
        assert!(!invoice.has_notes());
        invoice.notes = Some(String::new());
        assert!(!invoice.has_notes());
        invoice.notes = Some("Paid in advance".into());
        assert!(invoice.has_notes());
    }

    #[test]
    fn json_uses_wire_field_names_and_skips_logo() {
        let mut invoice = sample();
        invoice.id = Some(InvoiceId::new(7));
        invoice.logo = Some(vec![1, 2, 3]);

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["invoiceNumber"], "INV-001");
        assert_eq!(json["items"][0]["price"], 9.99);
        assert!(json.get("logo").is_none());
    }

    #[test]
    fn deserializes_with_missing_optionals() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"invoiceNumber":"INV-2","items":[{"description":"Bolt","quantity":3,"price":1.5}]}"#,
        )
        .unwrap();
        assert_eq!(invoice.id, None);
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.notes, None);
        assert!(invoice.logo.is_none());
    }
}
