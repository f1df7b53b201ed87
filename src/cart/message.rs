//! Price formatting, order message text and WhatsApp links

use super::CartLine;
use crate::types::Product;

const ORDER_GREETING: &str = "Hola! Quiero consultar / pedir estos productos:";
const ORDER_CLOSING: &str = "Gracias!";
/// Placeholder for an order line without any price
pub const NO_PRICE: &str = "s/p";
/// Cart total text when nothing has an ARS price
pub const TOTAL_PENDING: &str = "Total a confirmar";

/// Format an ARS amount the es-AR way, without decimals: `$ 12.500`
pub fn format_ars(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}$ {}", sign, group_thousands(&format!("{:.0}", rounded.abs()), '.'))
}

/// Format a USD amount the en-US way, with two decimals: `USD 1,234.50`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("USD {}{}.{}", sign, group_thousands(int_part, ','), frac_part)
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Price text of an order line: ARS when positive, else USD, else `s/p`
pub fn price_text(product: &Product) -> String {
    match (product.effective_ars(), product.price_usd) {
        (Some(ars), _) => format_ars(ars),
        (None, Some(usd)) => format_usd(usd),
        (None, None) => NO_PRICE.to_string(),
    }
}

/// Price labels of a catalog card: the ARS label and an optional USD label
pub fn card_prices(product: &Product) -> (String, Option<String>) {
    let usd = product.price_usd.filter(|p| *p > 0.0).map(format_usd);
    let ars = match (product.effective_ars(), &usd) {
        (Some(ars), _) => format_ars(ars),
        (None, Some(_)) => "Consultar".to_string(),
        (None, None) => "S/P".to_string(),
    };
    (ars, usd)
}

/// Cart total text
pub fn total_text(total: f64) -> String {
    if total > 0.0 {
        format_ars(total)
    } else {
        TOTAL_PENDING.to_string()
    }
}

/// Order summary sent over WhatsApp
pub fn order_message(lines: &[CartLine<'_>]) -> String {
    let mut out = vec![ORDER_GREETING.to_string(), String::new()];
    for line in lines {
        out.push(format!(
            "• {} x {} ({}) — {}",
            line.quantity,
            line.product.code,
            line.product.category,
            price_text(line.product)
        ));
    }
    out.push(String::new());
    out.push(ORDER_CLOSING.to_string());
    out.join("\n")
}

/// Single-product inquiry text
pub fn inquiry_message(product: &Product) -> String {
    format!(
        "Hola! Quiero consultar por {} ({}).",
        product.code, product.category
    )
}

/// WhatsApp deep link carrying `message` as its text parameter
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        number,
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, ars: Option<f64>, usd: Option<f64>) -> Product {
        Product {
            id: code.to_lowercase(),
            code: code.to_string(),
            category: "Dahua".to_string(),
            kind: String::new(),
            description: String::new(),
            price_ars: ars,
            price_usd: usd,
            image: String::new(),
            sheet_index: 0,
            row_index: 0,
        }
    }

    #[test]
    fn test_format_ars() {
        assert_eq!(format_ars(12500.0), "$ 12.500");
        assert_eq!(format_ars(1234567.89), "$ 1.234.568");
        assert_eq!(format_ars(999.4), "$ 999");
        assert_eq!(format_ars(0.0), "$ 0");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1234.5), "USD 1,234.50");
        assert_eq!(format_usd(99.999), "USD 100.00");
        assert_eq!(format_usd(1000000.0), "USD 1,000,000.00");
        assert_eq!(format_usd(0.0), "USD 0.00");
    }

    #[test]
    fn test_price_text_fallbacks() {
        assert_eq!(price_text(&product("A", Some(100.0), Some(5.0))), "$ 100");
        assert_eq!(price_text(&product("A", Some(0.0), Some(5.0))), "USD 5.00");
        assert_eq!(price_text(&product("A", None, Some(0.0))), "USD 0.00");
        assert_eq!(price_text(&product("A", None, None)), "s/p");
    }

    #[test]
    fn test_card_prices() {
        assert_eq!(
            card_prices(&product("A", Some(100.0), Some(5.0))),
            ("$ 100".to_string(), Some("USD 5.00".to_string()))
        );
        assert_eq!(
            card_prices(&product("A", None, Some(5.0))),
            ("Consultar".to_string(), Some("USD 5.00".to_string()))
        );
        assert_eq!(card_prices(&product("A", None, Some(0.0))), ("S/P".to_string(), None));
    }

    #[test]
    fn test_total_text() {
        assert_eq!(total_text(0.0), "Total a confirmar");
        assert_eq!(total_text(25000.0), "$ 25.000");
    }

    #[test]
    fn test_order_message() {
        let a = product("AX100", Some(12500.0), None);
        let b = product("BX2", None, None);
        let lines = vec![
            CartLine {
                product: &a,
                quantity: 2,
            },
            CartLine {
                product: &b,
                quantity: 1,
            },
        ];
        assert_eq!(
            order_message(&lines),
            "Hola! Quiero consultar / pedir estos productos:\n\n\
             • 2 x AX100 (Dahua) — $ 12.500\n\
             • 1 x BX2 (Dahua) — s/p\n\n\
             Gracias!"
        );
    }

    #[test]
    fn test_empty_order_message() {
        assert_eq!(
            order_message(&[]),
            "Hola! Quiero consultar / pedir estos productos:\n\n\nGracias!"
        );
    }

    #[test]
    fn test_whatsapp_link_encodes_text() {
        let link = whatsapp_link("5491100000000", "Hola! ¿Precio?");
        assert_eq!(link, "https://wa.me/5491100000000?text=Hola%21%20%C2%BFPrecio%3F");
    }

    #[test]
    fn test_inquiry_message() {
        assert_eq!(
            inquiry_message(&product("AX100", None, None)),
            "Hola! Quiero consultar por AX100 (Dahua)."
        );
    }
}
