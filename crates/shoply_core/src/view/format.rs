//! Fixed display formatting rules for money and plain numbers.

/// Currency symbol used by every formatted money value.
pub const CURRENCY_SYMBOL: &str = "₦";

/// Formats a money value as the currency symbol plus grouped digits,
/// e.g. `250000.0` -> `"₦250,000"`.
pub fn format_currency(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_digits(&format_number(amount)))
}

/// Shortest display form of a number: no trailing `.0` for whole values,
/// natural decimal digits otherwise. Used ungrouped in the CSV export.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Inserts `,` separators every three digits of the integer part, leaving
/// sign and fractional part untouched.
fn group_digits(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(rendered.len() + digits.len() / 3);
    for (pos, digit) in digits.iter().enumerate() {
        let digits_left = digits.len() - pos;
        if pos > 0 && digits_left % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
