//! Number formatting helpers for console output

/// Format a counter as an integer with thousands separators ("1,234,567")
///
/// Fractional parts are truncated toward zero.
pub fn format_count(value: f64) -> String {
    let truncated = value.trunc() as i64;
    let sign = if truncated < 0 { "-" } else { "" };
    let digits = truncated.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with one decimal place ("95.0%")
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
