/// Format with thousands separators and a fixed number of decimals.
///
/// `thousands(1234567.891, 2)` -> `"1,234,567.89"`
pub fn thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3 + decimals + 2);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Dollar amount with thousands separators
pub fn dollars(value: f64, decimals: usize) -> String {
    format!("${}", thousands(value, decimals))
}

/// Fraction in `[0, 1]` as a percentage with two decimals
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Truncate to at most `max` characters, never splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0.0, 2), "0.00");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(-98765.4, 1), "-98,765.4");
        assert_eq!(thousands(999.999, 2), "1,000.00");
    }

    #[test]
    fn test_dollars_and_percent() {
        assert_eq!(dollars(125000.4, 0), "$125,000");
        assert_eq!(dollars(42.0, 2), "$42.00");
        assert_eq!(percent(0.5234), "52.34%");
        assert_eq!(percent(1.0), "100.00%");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("¿Será así?", 5), "¿Será");
    }
}
