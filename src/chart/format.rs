use chrono::NaiveDate;

/// Price label: at most two decimals, trailing zeros dropped, thousands grouped.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (trimmed, None),
    };

    let mut out = group_thousands(int_part);
    if out == "-0" {
        out = "0".to_string();
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Volume label: `1.5M`, `12K`, or a grouped integer below one thousand.
pub fn format_volume(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    // thresholds sit where the lower unit would round up to 1000
    if value >= 999_500.0 {
        return format!("{:.1}M", value / 1_000_000.0);
    }
    if value >= 999.5 {
        return format!("{:.0}K", value / 1_000.0);
    }
    group_thousands(&format!("{:.0}", value))
}

/// X-axis label for a `YYYY-MM-DD` date: `MM-DD`. Anything else passes through.
pub fn format_date_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%m-%d").to_string(),
        Err(_) => date.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}
