use ratatui::style::Color;
use rust_decimal::Decimal;

/// Format a decimal amount as currency with thousand separators and
/// two decimal places, e.g. `1234567.89` → `"$1,234,567.89"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let sign = if val < Decimal::ZERO { "-" } else { "" };
    let fixed = format!("{:.2}", val.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// Parse a `#RRGGBB` hex string into a terminal color. Anything that
/// is not a seven-char hex triplet yields `None`.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Truncate a string to `max` visible characters, appending "…" if
/// truncated (the ellipsis counts toward `max`). Cuts on character
/// boundaries, so multi-byte UTF-8 is safe.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.char_indices().nth(max).is_none() {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .nth(max - 1)
        .map(|(i, _)| i)
        .unwrap_or_default();
    format!("{}…", &s[..cut])
}
