mod classifier;
mod fetch;
pub mod models;
mod time;

pub use classifier::{is_conference_day, Classification};
pub use fetch::{parse_calendar, parse_start_value, HttpCalendarSource, FETCH_TIMEOUT};
pub use models::{Calendar, CalendarEvent, EventStart, LectureTime};
pub use time::{in_window, todays_events};

use super::CalendarSource;
use crate::error::CheckinResult;
use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

/// Fetch the calendar and classify today's events for the lecture slot
pub async fn check_calendar<C: CalendarSource + ?Sized>(
    source: &C,
    url: &str,
    tz: &Tz,
    today: NaiveDate,
    lecture_time: LectureTime,
    skip_keywords: &[String],
) -> CheckinResult<Classification> {
    let calendar = source.fetch(url).await?;
    let events = todays_events(&calendar, tz, today, Some(lecture_time));
    debug!(
        "{} of {} events fall in the {} slot today",
        events.len(),
        calendar.events.len(),
        lecture_time
    );

    Ok(is_conference_day(&events, skip_keywords))
}
