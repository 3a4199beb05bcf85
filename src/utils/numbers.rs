//! Number formatting shared by the tray label and the report view.
//!
//! `format_n0` / `format_n1` produce grouped decimal strings ("1,234", "12.5"),
//! rounding half away from zero.

/// Format with no decimals and thousands separators.
pub fn format_n0(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded.unsigned_abs()))
}

/// Format with one decimal and thousands separators.
pub fn format_n1(value: f64) -> String {
    if !value.is_finite() {
        return "0.0".to_string();
    }
    let scaled = (value * 10.0).round() as i64;
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.unsigned_abs();
    format!("{}{}.{}", sign, group_thousands(abs / 10), abs % 10)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
