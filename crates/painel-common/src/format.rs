//! KPI display formatting.
//!
//! Every KPI is served as a pre-formatted string. Numbers use `,` as the
//! thousands separator and `.` as the decimal point; anything that is not a
//! finite number renders as [`NA`].

/// Placeholder for a KPI that cannot be computed.
pub const NA: &str = "N/A";

/// Format with a fixed number of decimals and `,` thousands separators,
/// e.g. `1234567.891` with 2 decimals → `1,234,567.89`.
pub fn thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NA.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
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

/// Fixed decimals without grouping; `None` or non-finite → `N/A`.
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => NA.to_string(),
    }
}

/// Two-decimal percentage with a trailing `%`.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => NA.to_string(),
    }
}

/// Brazilian real amount, e.g. `R$ 1,234.50`.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return NA.to_string();
    }
    format!("R$ {}", thousands(value, 2))
}

/// Number followed by a unit label, e.g. `12.3 dias`.
pub fn with_unit(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*} {}", decimals, v, unit),
        _ => NA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0.0, 0), "0");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(112650.0, 0), "112,650");
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(-9876543.0, 1), "-9,876,543.0");
    }

    #[test]
    fn test_non_finite_is_na() {
        assert_eq!(thousands(f64::NAN, 2), NA);
        assert_eq!(fixed(Some(f64::INFINITY), 2), NA);
        assert_eq!(percent(None), NA);
        assert_eq!(with_unit(Some(f64::NAN), 1, "dias"), NA);
    }

    #[test]
    fn test_kpi_patterns() {
        assert_eq!(percent(Some(8.1234)), "8.12%");
        assert_eq!(percent(Some(0.0)), "0.00%");
        assert_eq!(currency(13591643.7), "R$ 13,591,643.70");
        assert_eq!(with_unit(Some(12.34), 1, "dias"), "12.3 dias");
        assert_eq!(with_unit(Some(0.58), 2, "pontos"), "0.58 pontos");
        assert_eq!(fixed(Some(3.0), 2), "3.00");
    }
}
