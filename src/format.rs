//! Number formatting for the metric cards.

/// Whole number with comma thousands separators: `1234567.5` → `1,234,568`.
pub fn thousands(value: f64) -> String {
    let rounded = value.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-friendly abbreviation with up to two decimals: `1234` → `1.23K`,
/// `2500000` → `2.5M`, `22` → `22`.
pub fn abbreviate(value: f64) -> String {
    const SCALES: [(f64, &str); 5] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K"), (1.0, "")];

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let mut idx = SCALES
        .iter()
        .position(|(scale, _)| abs >= *scale)
        .unwrap_or(SCALES.len() - 1);
    let mut text = format!("{:.2}", abs / SCALES[idx].0);
    // 999.999K rounds up to 1000.00K and belongs to the next suffix
    if idx > 0 && text.parse::<f64>().is_ok_and(|v| v >= 1000.0) {
        idx -= 1;
        text = format!("{:.2}", abs / SCALES[idx].0);
    }

    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{sign}{text}{}", SCALES[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(1_234_567.4), "1,234,567");
        assert_eq!(thousands(3_000_000_000.0), "3,000,000,000");
        assert_eq!(thousands(-12_345.0), "-12,345");
    }

    #[test]
    fn abbreviates_large_numbers() {
        assert_eq!(abbreviate(22.0), "22");
        assert_eq!(abbreviate(22.5), "22.5");
        assert_eq!(abbreviate(1234.0), "1.23K");
        assert_eq!(abbreviate(2_500_000.0), "2.5M");
        assert_eq!(abbreviate(3_000_000_000.0), "3B");
        assert_eq!(abbreviate(-1500.0), "-1.5K");
        assert_eq!(abbreviate(0.0), "0");
    }

    #[test]
    fn rounding_up_moves_to_the_next_suffix() {
        assert_eq!(abbreviate(999.999), "1K");
        assert_eq!(abbreviate(999_999.0), "1M");
        assert_eq!(abbreviate(-999_999.0), "-1M");
        assert_eq!(abbreviate(999_999_999.0), "1B");
        assert_eq!(abbreviate(999_000.0), "999K");
    }
}
