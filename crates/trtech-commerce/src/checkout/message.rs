//! Order summary text sent through the messaging hand-off.

use super::details::DeliveryDetails;
use crate::cart::CartLineItem;
use crate::money::Money;
use std::fmt::Write;

/// One itemized line: `<name> (<condition>) x<quantity> - R<subtotal>`.
pub fn line_summary(item: &CartLineItem) -> String {
    format!(
        "{} ({}) x{} - {}",
        item.name,
        item.condition,
        item.quantity,
        item.subtotal().display()
    )
}

/// Render the order summary for a cart and validated delivery details.
pub fn render_order_message(
    items: &[CartLineItem],
    total: Money,
    details: &DeliveryDetails,
) -> String {
    let mut out = String::with_capacity(256 + items.len() * 48);

    out.push_str("Hi! I'd like to place an order:\n\n");
    let _ = writeln!(out, "Customer: {}", details.name);
    let _ = writeln!(out, "Email: {}", details.email);
    let _ = writeln!(out, "Phone: {}", details.phone);
    let _ = writeln!(out, "Address: {}", details.address_line());
    out.push('\n');

    out.push_str("ORDER DETAILS:\n");
    let lines: Vec<String> = items.iter().map(line_summary).collect();
    out.push_str(&lines.join("\n"));
    out.push_str("\n\n");

    let _ = writeln!(out, "Total: {}", total.display());
    out.push('\n');
    let _ = write!(out, "Notes: {}", details.notes_or_none());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Condition, Product};

    fn details() -> DeliveryDetails {
        DeliveryDetails {
            name: "John Doe".into(),
            email: "john@x.com".into(),
            phone: "0820000000".into(),
            street: "1 Main St".into(),
            city: "Joburg".into(),
            postal_code: "2000".into(),
            province: "Gauteng".into(),
            notes: String::new(),
        }
    }

    fn cable_x2() -> CartLineItem {
        let mut line = CartLineItem::from_product(&Product::new(
            1u64,
            "Cable",
            Money::rand(14900),
            Condition::New,
        ));
        line.quantity = 2;
        line
    }

    #[test]
    fn test_full_message() {
        let text = render_order_message(&[cable_x2()], Money::rand(29800), &details());
        let expected = "Hi! I'd like to place an order:\n\n\
            Customer: John Doe\n\
            Email: john@x.com\n\
            Phone: 0820000000\n\
            Address: 1 Main St, Joburg, Gauteng 2000\n\n\
            ORDER DETAILS:\n\
            Cable (new) x2 - R298.00\n\n\
            Total: R298.00\n\n\
            Notes: None";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_notes_are_kept() {
        let mut details = details();
        details.notes = "Call on arrival".into();
        let text = render_order_message(&[cable_x2()], Money::rand(29800), &details);
        assert!(text.ends_with("Notes: Call on arrival"));
    }

    #[test]
    fn test_lines_in_cart_order() {
        let mut ssd = CartLineItem::from_product(&Product::new(
            2u64,
            "SSD",
            Money::rand(89950),
            Condition::PreOwned,
        ));
        ssd.quantity = 1;
        let text = render_order_message(&[cable_x2(), ssd], Money::rand(119750), &details());

        let cable_at = text.find("Cable (new) x2 - R298.00").unwrap();
        let ssd_at = text.find("SSD (pre-owned) x1 - R899.50").unwrap();
        assert!(cable_at < ssd_at);
        assert!(text.contains("Total: R1197.50"));
    }
}
