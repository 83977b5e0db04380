use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Lecture slot to check in for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum LectureTime {
    /// Morning conference
    #[value(name = "8AM")]
    Morning,
    /// Midday conference
    #[value(name = "12PM")]
    Midday,
}

impl LectureTime {
    /// Label used on the command line and in the survey's time question
    pub fn label(&self) -> &'static str {
        match self {
            LectureTime::Morning => "8AM",
            LectureTime::Midday => "12PM",
        }
    }

    /// Local hours counted as this slot, as a half-open range
    pub fn hour_range(&self) -> (u32, u32) {
        match self {
            LectureTime::Morning => (7, 10),
            LectureTime::Midday => (11, 14),
        }
    }
}

impl fmt::Display for LectureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Start of a calendar event as written in DTSTART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStart {
    /// All-day event, no time component
    Date(NaiveDate),
    /// Wall-clock time with no zone attached
    Floating(NaiveDateTime),
    /// Absolute instant (UTC or TZID-qualified)
    Zoned(DateTime<Utc>),
}

impl EventStart {
    /// Local date and, when the start has one, local hour
    pub fn local_date_hour(&self, tz: &Tz) -> (NaiveDate, Option<u32>) {
        match self {
            EventStart::Date(date) => (*date, None),
            // Floating times are already local; no shifting
            EventStart::Floating(naive) => (naive.date(), Some(naive.hour())),
            EventStart::Zoned(instant) => {
                let local = instant.with_timezone(tz);
                (local.date_naive(), Some(local.hour()))
            }
        }
    }
}

/// Simplified calendar event representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: EventStart,
}

/// Events of a parsed calendar document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    pub events: Vec<CalendarEvent>,
}
