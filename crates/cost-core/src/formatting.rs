/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use cost_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(20000.0, 2), "20,000.00");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;

    // `{:.N}` already rounds correctly; only the integer part needs grouping.
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    if negative && result.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a count with thousands separators, rounded to a whole number.
///
/// ```
/// use cost_core::formatting::format_count;
///
/// assert_eq!(format_count(2_000_000.0), "2,000,000");
/// assert_eq!(format_count(999.4), "999");
/// ```
pub fn format_count(value: f64) -> String {
    format_number(value, 0)
}

/// Format a monetary amount as a USD string with two decimal places and
/// thousands separators.
///
/// ```
/// use cost_core::formatting::format_currency;
///
/// assert_eq!(format_currency(4650.0), "$4,650.00");
/// assert_eq!(format_currency(0.6231), "$0.62");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("$-{}", format_number(amount.abs(), 2))
    } else {
        format!("${}", format_number(amount, 2))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead {
            result.push(',');
        }
        result.push(c);
    }
    result
}
