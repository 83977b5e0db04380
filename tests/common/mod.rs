#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;
use conference_checkin::components::calendar::{Calendar, CalendarEvent, EventStart};
use conference_checkin::components::survey::selectors::Selector;
use conference_checkin::components::survey::SurveyPage;
use conference_checkin::components::{CalendarSource, SurveyRequest, SurveySubmitter};
use conference_checkin::error::{format_error, network_error, submission_error, CheckinResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock calendar returns
#[derive(Debug, Clone)]
pub enum MockCalendar {
    Events(Calendar),
    Timeout,
    Malformed,
}

/// Mock implementation of the calendar feed for testing
#[derive(Debug)]
pub struct MockCalendarSource {
    response: MockCalendar,
    calls: AtomicUsize,
}

impl MockCalendarSource {
    pub fn new(response: MockCalendar) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Calendar whose events all start at the given Los Angeles wall-clock times
    pub fn with_events(events: &[(&str, EventStart)]) -> Self {
        let events = events
            .iter()
            .map(|(summary, start)| CalendarEvent {
                summary: summary.to_string(),
                start: *start,
            })
            .collect();
        Self::new(MockCalendar::Events(Calendar { events }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalendarSource for MockCalendarSource {
    async fn fetch(&self, _url: &str) -> CheckinResult<Calendar> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            MockCalendar::Events(calendar) => Ok(calendar.clone()),
            MockCalendar::Timeout => Err(network_error("request timed out")),
            MockCalendar::Malformed => Err(format_error("Document contains no VCALENDAR")),
        }
    }
}

/// Mock survey driver that records every request
#[derive(Debug)]
pub struct MockSurveySubmitter {
    succeed: bool,
    requests: Mutex<Vec<SurveyRequest>>,
}

impl MockSurveySubmitter {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SurveyRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SurveySubmitter for MockSurveySubmitter {
    async fn submit(&self, request: &SurveyRequest) -> bool {
        self.requests.lock().unwrap().push(request.clone());
        self.succeed
    }
}

/// Friday morning before the first lecture
pub fn now() -> DateTime<Tz> {
    Los_Angeles.with_ymd_and_hms(2026, 10, 16, 6, 30, 0).unwrap()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Floating start at `hour`:00 today
pub fn today_at(hour: u32) -> EventStart {
    EventStart::Floating(today().and_hms_opt(hour, 0, 0).unwrap())
}

/// Something the survey driver did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Goto(String),
    Ready,
    Click(Selector),
    Fill(Selector, String),
    Settle(Duration),
    Pause,
    Close,
}

/// Mock browser page that records every successful interaction.
///
/// Every selector is present except the ones listed as missing.
#[derive(Debug, Default)]
pub struct RecordingPage {
    missing: Vec<Selector>,
    actions: Mutex<Vec<PageAction>>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(missing: Vec<Selector>) -> Self {
        Self {
            missing,
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn actions(&self) -> Vec<PageAction> {
        self.actions.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<Selector> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                PageAction::Click(selector) => Some(selector),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &PageAction) -> usize {
        self.actions().iter().filter(|action| *action == wanted).count()
    }

    fn record(&self, action: PageAction) {
        self.actions.lock().unwrap().push(action);
    }

    fn require(&self, selector: &Selector) -> CheckinResult<()> {
        if self.missing.contains(selector) {
            Err(submission_error(&format!("{} not found", selector)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SurveyPage for RecordingPage {
    async fn goto(&self, url: &str) -> CheckinResult<()> {
        self.record(PageAction::Goto(url.to_string()));
        Ok(())
    }

    async fn wait_until_ready(&self, _timeout: Duration) -> CheckinResult<()> {
        self.record(PageAction::Ready);
        Ok(())
    }

    async fn is_present(&self, selector: &Selector) -> CheckinResult<bool> {
        Ok(!self.missing.contains(selector))
    }

    async fn click(&self, selector: &Selector, _timeout: Duration) -> CheckinResult<()> {
        self.require(selector)?;
        self.record(PageAction::Click(selector.clone()));
        Ok(())
    }

    async fn fill(&self, selector: &Selector, text: &str, _timeout: Duration) -> CheckinResult<()> {
        self.require(selector)?;
        self.record(PageAction::Fill(selector.clone(), text.to_string()));
        Ok(())
    }

    async fn settle(&self, delay: Duration) {
        self.record(PageAction::Settle(delay));
    }

    async fn pause(&self, _message: &str) {
        self.record(PageAction::Pause);
    }

    async fn close(&self) -> CheckinResult<()> {
        self.record(PageAction::Close);
        Ok(())
    }
}
