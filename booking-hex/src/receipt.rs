//! Receipt rendering.
//!
//! Builds the HTML confirmation email from the booking form and the selected
//! services. Prices arrive in whole rupees; the authoritative charged amount,
//! when available from the order store, arrives in paise.

use booking_types::{ReceiptFormData, SelectedService};

/// Placeholder substituted for absent optional fields.
const PLACEHOLDER: &str = "—";

/// Static receipt configuration, injected once at startup.
#[derive(Debug, Clone, Default)]
pub struct ReceiptSettings {
    /// Fixed internal mailboxes copied on every receipt.
    pub internal_recipients: Vec<String>,
    /// Phone numbers rendered into the confirm-your-slot line, if any.
    pub contact_phones: Option<String>,
}

/// Subject line of every confirmation email.
pub const RECEIPT_SUBJECT: &str = "Swarg Vatika Payment Confirmation";

/// Sums the selected services' prices in whole rupees.
///
/// Always recomputed server-side; a client pre-summed total is never trusted.
pub fn services_total(services: &[SelectedService]) -> i64 {
    services.iter().map(|s| s.price).sum()
}

/// Renders the confirmation email body.
///
/// `charged_paise` is the amount recorded at order creation; when present it
/// overrides the service-price sum as the displayed total.
pub fn render_receipt(
    form: &ReceiptFormData,
    services: &[SelectedService],
    charged_paise: Option<i64>,
    settings: &ReceiptSettings,
) -> String {
    let services_html: String = services
        .iter()
        .map(|s| {
            format!(
                "<li>{} — ₹{}</li>",
                escape_html(&s.title),
                format_inr(s.price)
            )
        })
        .collect();

    let total = match charged_paise {
        Some(paise) => paise / 100,
        None => services_total(services),
    };

    let contact_line = settings
        .contact_phones
        .as_deref()
        .map(|phones| {
            format!(
                "<p><strong>Please call {} to confirm your date and time slot immediately.</strong></p>",
                escape_html(phones)
            )
        })
        .unwrap_or_default();

    format!(
        "<p>Dear {name},</p>\
         <p>Thank you for choosing Swarg Vatika.</p>\
         <h3>Your Receipt</h3>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Address:</strong> {address}</p>\
         <p><strong>Notes:</strong> {notes}</p>\
         <h3>Services Availed</h3>\
         <ul>{services_html}</ul>\
         <p><strong>Total Amount:</strong> ₹{total}</p>\
         {contact_line}\
         <p>Thanks &amp; Regards,<br/>Team Swarg Vatika</p>",
        name = escape_html(&form.name),
        email = escape_html(&form.email),
        phone = escape_html(&form.phone),
        address = optional(&form.address),
        notes = optional(&form.notes),
        services_html = services_html,
        total = format_inr(total),
        contact_line = contact_line,
    )
}

fn optional(field: &Option<String>) -> String {
    match field.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => escape_html(s),
        _ => PLACEHOLDER.to_string(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a rupee amount with Indian digit grouping (last three digits,
/// then pairs): 500000 -> "5,00,000".
pub fn format_inr(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (h, t) = rest.split_at(rest.len() - 2);
            groups.push(t);
            rest = h;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    if n < 0 { format!("-{grouped}") } else { grouped }
}
