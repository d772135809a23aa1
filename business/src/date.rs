use chrono::{Local, NaiveDate};

/// Day-month-year with two digits each, e.g. `05.03.25`.
pub const CHECK_DATE_FORMAT: &str = "%d.%m.%y";

/// Formats the date stored in a checked cell.
pub fn format_check_date(date: NaiveDate) -> String {
    date.format(CHECK_DATE_FORMAT).to_string()
}

/// Today in the local time zone of the browser (or host).
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padded_two_digit_year() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_check_date(date), "05.03.25");

        let date = NaiveDate::from_ymd_opt(2009, 12, 31).unwrap();
        assert_eq!(format_check_date(date), "31.12.09");
    }

    #[test]
    fn test_today_round_trips_through_format() {
        let formatted = format_check_date(today());
        assert_eq!(formatted.len(), 8);
        assert!(NaiveDate::parse_from_str(&formatted, CHECK_DATE_FORMAT).is_ok());
    }
}
