use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Current time in `tz`
pub fn local_now(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Date as the survey expects it, MM/DD/YYYY with leading zeros
pub fn format_survey_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Long date for the start banner, e.g. "Friday, October 16, 2026"
pub fn format_banner_date(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_format_survey_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_survey_date(date), "01/05/2026");

        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(format_survey_date(date), "12/31/2026");
    }

    #[test]
    fn test_format_banner_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_banner_date(date), "Friday, October 16, 2026");

        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(format_banner_date(date), "Monday, March 02, 2026");
    }

    #[test]
    fn test_local_date_differs_from_utc() {
        // 03:00 UTC is still the previous evening in Los Angeles
        let utc = Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap();
        let local = utc.with_timezone(&chrono_tz::America::Los_Angeles);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(local.hour(), 20);

        let now = local_now(&chrono_tz::UTC);
        assert_eq!(now.timezone(), chrono_tz::UTC);
    }
}
