/// Group digits in threes, the way the page renders totals: 1054787 ->
/// "1,054,787". Negative values keep their sign ahead of the grouping.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    let lead = digits.len() % 3;
    if lead > 0 {
        grouped.push_str(&digits[..lead]);
    }
    for chunk in digits[lead..].as_bytes().chunks(3) {
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push_str(std::str::from_utf8(chunk).expect("ascii digits"));
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_currency(value: i64) -> String {
    format!("${}", format_number(value))
}

/// Live phone formatting: strip non-digits, keep the first ten, and lay them
/// out as `(DDD) DDD-DDDD`. Partial input gets the partial layout, matching
/// what the field shows while digits are still being typed.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(10)
        .collect();

    let mut formatted = String::with_capacity(14);
    if !digits.is_empty() {
        formatted.push('(');
        formatted.push_str(&digits[..digits.len().min(3)]);
    }
    if digits.len() >= 3 {
        formatted.push_str(") ");
        formatted.push_str(&digits[3..digits.len().min(6)]);
    }
    if digits.len() >= 6 {
        formatted.push('-');
        formatted.push_str(&digits[6..]);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(52_000), "52,000");
        assert_eq!(format_number(1_054_787), "1,054,787");
        assert_eq!(format_number(-1_234), "-1,234");
    }

    #[test]
    fn currency_prefixes_dollar_sign() {
        assert_eq!(format_currency(25), "$25");
        assert_eq!(format_currency(1_500_000), "$1,500,000");
    }

    #[test]
    fn formats_complete_phone_number() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
    }

    #[test]
    fn strips_punctuation_before_formatting() {
        assert_eq!(format_phone("555-123-4567"), "(555) 123-4567");
        assert_eq!(format_phone(" (555) 123 4567 "), "(555) 123-4567");
    }

    #[test]
    fn truncates_to_ten_digits() {
        assert_eq!(format_phone("55512345678999"), "(555) 123-4567");
    }

    #[test]
    fn partial_input_gets_partial_layout() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("5"), "(5");
        assert_eq!(format_phone("555"), "(555) ");
        assert_eq!(format_phone("55512"), "(555) 12");
        assert_eq!(format_phone("555123"), "(555) 123-");
        assert_eq!(format_phone("5551239"), "(555) 123-9");
    }
}
