use chrono::{Local, Months, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const AXIS_TIME_FORMAT: &str = "%b %d";
}

// Time Helper functions

pub fn date_to_string(date: NaiveDate) -> String {
    // Used for display purposes
    format!("{}", date.format(TimeUtils::STANDARD_TIME_FORMAT))
}

pub fn date_to_axis_label(date: NaiveDate) -> String {
    format!("{}", date.format(TimeUtils::AXIS_TIME_FORMAT))
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar date `months` before `date`, clamped to the end of shorter months.
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_before_clamps_day() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(months_before(d, 15), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn formats_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date_to_string(d), "2025-03-07");
        assert_eq!(date_to_axis_label(d), "Mar 07");
    }
}
