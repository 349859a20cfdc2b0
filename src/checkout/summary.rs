//! The plain-text order summary sent to the merchant, and the messaging deep link that
//! carries it.

use crate::model::{format_brl, Order, PaymentMethod};
use rust_decimal::Decimal;
use std::fmt::Write;
use url::form_urlencoded;

const MESSAGING_BASE: &str = "https://wa.me";

/// Notes as stored on the order: the customer's text followed by the payment method.
pub fn annotate_notes(notes: &str, method: PaymentMethod) -> String {
    let notes = notes.trim();
    if notes.is_empty() {
        format!("Pagamento: {}", method.label())
    } else {
        format!("{notes}\nPagamento: {}", method.label())
    }
}

/// `#<number>` once the store assigned one, else the client-side short id.
pub fn display_order_id(order_number: Option<u32>, short_id: &str) -> String {
    match order_number {
        Some(number) => format!("#{number}"),
        None => short_id.to_string(),
    }
}

/// Itemized summary in pt-BR. Discount lines appear only when non-zero.
pub fn order_summary(order: &Order, display_id: &str, customer_notes: &str) -> String {
    let mut msg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(msg, "*Novo pedido {display_id}*");
    let _ = writeln!(msg, "Ref: {}", order.short_id);
    msg.push('\n');
    for item in &order.items {
        let _ = writeln!(
            msg,
            "{}x {} - {}",
            item.quantity,
            item.name,
            format_brl(item.line_total())
        );
    }
    msg.push('\n');
    let _ = writeln!(msg, "Subtotal: {}", format_brl(order.subtotal));
    if order.coupon_discount > Decimal::ZERO {
        let code = order.coupon_code.as_deref().unwrap_or_default();
        let _ = writeln!(msg, "Cupom ({code}): -{}", format_brl(order.coupon_discount));
    }
    if order.payment_discount > Decimal::ZERO {
        let _ = writeln!(msg, "Desconto PIX: -{}", format_brl(order.payment_discount));
    }
    let _ = writeln!(msg, "*Total: {}*", format_brl(order.total));
    msg.push('\n');
    let _ = writeln!(msg, "Pagamento: {}", order.payment_method.label());
    let _ = write!(msg, "Cliente: {}", order.customer_name);
    let customer_notes = customer_notes.trim();
    if !customer_notes.is_empty() {
        let _ = write!(msg, "\nObservações: {customer_notes}");
    }
    msg
}

/// `https://wa.me/<phone>?text=<message>`, with the message percent-encoded (spaces as
/// `%20`).
pub fn messaging_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let encoded: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    // byte_serialize writes spaces as '+' and escapes literal '+' as %2B.
    format!("{MESSAGING_BASE}/{digits}?text={}", encoded.replace('+', "%20"))
}
