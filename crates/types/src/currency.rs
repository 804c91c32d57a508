//! Fixed-format currency display.
//!
//! Amounts are always rendered with exactly two decimal digits and a literal
//! symbol prefix. There is no locale negotiation and no rounding mode beyond
//! what the two-decimal display format implies.

/// Format an amount as `<symbol><amount>` with two decimal digits.
pub fn format(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_two_decimals() {
        assert_eq!(format("₹", 25.0), "₹25.00");
        assert_eq!(format("₹", 19.98), "₹19.98");
        assert_eq!(format("$", 0.0), "$0.00");
    }

    #[test]
    fn rounds_to_display_precision() {
        assert_eq!(format("₹", 4.498), "₹4.50");
        assert_eq!(format("₹", 49.478), "₹49.48");
    }
}
