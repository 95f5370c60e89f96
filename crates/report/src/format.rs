//! Value formatting for reports (en-US conventions).

use rust_decimal::{Decimal, RoundingStrategy};

/// `$1,234.56`; negative amounts as `-$1,234.56`.
pub fn currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// A count with thousands separators and up to three fraction digits, e.g.
/// `12,500` or `1,234.5`.
pub fn grouped(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    match digits.split_once('.') {
        Some((whole, fraction)) => format!("{sign}{}.{fraction}", group_thousands(whole)),
        None => format!("{sign}{}", group_thousands(&digits)),
    }
}

/// The shortest plain rendering of a number: `0.17`, `36`, `1.5`.
pub fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}

/// `1.5 months`. Negative or saturated payback means the cost is never
/// recovered.
pub fn payback(months: Decimal) -> String {
    if months < Decimal::ZERO || months == Decimal::MAX {
        "Not reached".to_string()
    } else {
        format!("{} months", plain(months))
    }
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
