/// Groups digits in thousands, e.g. `555719` -> `555,719`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Risk factor values above a thousand get grouped, smaller ones print as-is.
pub fn format_factor_value(value: f64) -> String {
    if value.is_nan() {
        return String::from("-");
    }
    if value > 1000.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        return format_count(value as u64);
    }
    format!("{value}")
}

pub fn hour_label(hour: u32) -> String {
    format!("{hour}:00")
}

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const CITY_SIZES: [(u64, &str); 6] = [
    (10_000, "Small Town (10,000)"),
    (50_000, "Small City (50,000)"),
    (100_000, "Medium City (100,000)"),
    (250_000, "Large City (250,000)"),
    (500_000, "Major City (500,000)"),
    (1_000_000, "Metro Area (1,000,000+)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(2_145), "2,145");
        assert_eq!(format_count(555_719), "555,719");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn factor_values() {
        assert_eq!(format_factor_value(250_000.0), "250,000");
        assert_eq!(format_factor_value(25.5), "25.5");
        assert_eq!(format_factor_value(f64::NAN), "-");
    }

    #[test]
    fn hour_labels() {
        assert_eq!(hour_label(0), "0:00");
        assert_eq!(hour_label(23), "23:00");
    }
}
