use super::models::{Calendar, CalendarEvent, LectureTime};
use chrono::NaiveDate;
use chrono_tz::Tz;

/// Hours covered when no lecture slot is given
const ALL_DAY: (u32, u32) = (0, 24);

/// Whether `hour` falls in the slot's half-open hour range
pub fn in_window(hour: u32, window: Option<LectureTime>) -> bool {
    let (start_hour, end_hour) = window.map_or(ALL_DAY, |w| w.hour_range());
    (start_hour..end_hour).contains(&hour)
}

/// Events starting on `today` in `tz`, narrowed to the lecture slot.
///
/// All-day events are matched on date alone. Output keeps calendar order.
pub fn todays_events(
    calendar: &Calendar,
    tz: &Tz,
    today: NaiveDate,
    window: Option<LectureTime>,
) -> Vec<CalendarEvent> {
    calendar
        .events
        .iter()
        .filter(|event| {
            let (date, hour) = event.start.local_date_hour(tz);
            date == today && hour.map_or(true, |hour| in_window(hour, window))
        })
        .cloned()
        .collect()
}
