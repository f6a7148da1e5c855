//! Formatting helpers for Telegram HTML replies.

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Significant digits kept when rendering amounts; float noise sits well below this.
const AMOUNT_SIGNIFICANT_DIGITS: usize = 12;

/// Render an amount rounded to 12 significant digits, in plain decimal notation.
///
/// Hides float artifacts such as `0.30000000000000004` without flattening tiny
/// amounts like `1e-9` to zero.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.*e}", AMOUNT_SIGNIFICANT_DIGITS - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Render a quote price: thousands separators and cents for prices >= 1,
/// otherwise the significant digits `format_amount` keeps.
pub fn format_price(price: f64) -> String {
    if price.abs() < 1.0 {
        return format_amount(price);
    }

    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
