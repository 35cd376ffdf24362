use chrono::NaiveTime;

use crate::error::DomainError;

// 12-hour forms first so that a trailing meridiem is never silently dropped.
const CLOCK_FORMATS: [&str; 5] = ["%I:%M %p", "%I:%M:%S %p", "%I:%M%p", "%H:%M:%S", "%H:%M"];

/// Parses `"10:00 AM"`, `"12:30:15 pm"`, `"13:05"` or `"13:05:00"` into a time of day.
pub fn parse_clock(input: &str) -> Result<NaiveTime, DomainError> {
    let trimmed = input.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DomainError::InvalidClockTime(input.to_string()))
}

/// Canonical 24-hour `HH:MM:SS` rendering.
pub fn canonical(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(input: &str) -> String {
        canonical(parse_clock(input).unwrap())
    }

    #[test]
    fn midnight_and_noon() {
        assert_eq!(normalize("12:00 AM"), "00:00:00");
        assert_eq!(normalize("12:00 PM"), "12:00:00");
    }

    #[test]
    fn single_digit_hours_and_late_evening() {
        assert_eq!(normalize("1:00 AM"), "01:00:00");
        assert_eq!(normalize("11:59 PM"), "23:59:00");
    }

    #[test]
    fn meridiem_is_case_insensitive() {
        assert_eq!(normalize("10:00 am"), "10:00:00");
        assert_eq!(normalize("3:15 pm"), "15:15:00");
    }

    #[test]
    fn meridiem_without_space() {
        assert_eq!(normalize("10:00AM"), "10:00:00");
    }

    #[test]
    fn twelve_hour_with_seconds() {
        assert_eq!(normalize("12:30:15 PM"), "12:30:15");
    }

    #[test]
    fn twenty_four_hour_input_passes_through() {
        assert_eq!(normalize("13:30"), "13:30:00");
        assert_eq!(normalize("09:00:00"), "09:00:00");
        assert_eq!(normalize("  17:00  "), "17:00:00");
    }

    #[test]
    fn malformed_input_is_rejected() {
        for bad in ["", "noon", "25:00", "13:00 PM", "10:61", "10"] {
            assert_eq!(
                parse_clock(bad),
                Err(DomainError::InvalidClockTime(bad.to_string())),
                "{bad}"
            );
        }
    }
}
