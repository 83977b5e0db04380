use crate::error::CheckinResult;
use async_trait::async_trait;

pub mod calendar;
pub mod survey;

pub use calendar::{Calendar, HttpCalendarSource, LectureTime};
pub use survey::{SurveyRequest, WebDriverSubmitter};

/// Where the calendar comes from
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch and parse the calendar at `url`.
    ///
    /// Transport failures are `Error::Network`, unparseable documents
    /// `Error::Format`.
    async fn fetch(&self, url: &str) -> CheckinResult<Calendar>;
}

/// Something that can fill in and submit the attendance survey
#[async_trait]
pub trait SurveySubmitter: Send + Sync {
    /// Returns whether the survey was filled (and, outside dry-run, submitted).
    /// Failures are logged by the implementation.
    async fn submit(&self, request: &SurveyRequest) -> bool;
}
