use super::models::{Calendar, CalendarEvent, EventStart};
use crate::components::CalendarSource;
use crate::error::{format_error, network_error, CheckinResult};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Calendar fetch timeout
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches iCalendar feeds over HTTP
#[derive(Debug, Clone)]
pub struct HttpCalendarSource {
    client: Client,
}

impl HttpCalendarSource {
    /// Create a source whose requests give up after [`FETCH_TIMEOUT`]
    pub fn new() -> CheckinResult<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> CheckinResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CalendarSource for HttpCalendarSource {
    async fn fetch(&self, url: &str) -> CheckinResult<Calendar> {
        let url = Url::parse(url)
            .map_err(|e| network_error(&format!("Invalid calendar URL {}: {}", url, e)))?;

        debug!("Fetching calendar from {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(network_error(&format!(
                "Failed to fetch calendar: HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_calendar(&body)
    }
}

/// Parse an iCalendar document, keeping VEVENTs that have a DTSTART
pub fn parse_calendar(body: &str) -> CheckinResult<Calendar> {
    let reader = ical::IcalParser::new(body.as_bytes());

    let mut calendar = Calendar::default();
    let mut found_calendar = false;

    for calendar_result in reader {
        let ical_calendar =
            calendar_result.map_err(|e| format_error(&format!("ICS parse error: {}", e)))?;
        found_calendar = true;

        for event in &ical_calendar.events {
            if let Some(parsed) = parse_event(event)? {
                calendar.events.push(parsed);
            }
        }
    }

    if !found_calendar {
        return Err(format_error("Document contains no VCALENDAR"));
    }

    debug!("Parsed {} events", calendar.events.len());
    Ok(calendar)
}

fn parse_event(event: &IcalEvent) -> CheckinResult<Option<CalendarEvent>> {
    let mut summary = String::new();
    let mut start = None;

    for property in &event.properties {
        match property.name.as_str() {
            "SUMMARY" => {
                summary = unescape_text(property.value.as_deref().unwrap_or_default());
            }
            "DTSTART" => {
                start = Some(parse_dtstart(property)?);
            }
            _ => {}
        }
    }

    Ok(start.map(|start| CalendarEvent { summary, start }))
}

fn parse_dtstart(property: &Property) -> CheckinResult<EventStart> {
    let value = property
        .value
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| format_error("DTSTART without a value"))?;

    parse_start_value(
        value,
        param_value(property, "VALUE"),
        param_value(property, "TZID"),
    )
}

fn param_value<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(|value| value.trim_matches('"'))
}

/// Interpret a DTSTART value with its VALUE and TZID parameters
pub fn parse_start_value(
    value: &str,
    value_type: Option<&str>,
    tzid: Option<&str>,
) -> CheckinResult<EventStart> {
    let invalid = |e: chrono::ParseError| format_error(&format!("Invalid DTSTART {}: {}", value, e));

    if value_type.is_some_and(|v| v.eq_ignore_ascii_case("DATE")) || value.len() == 8 {
        return NaiveDate::parse_from_str(value, "%Y%m%d")
            .map(EventStart::Date)
            .map_err(invalid);
    }

    if let Some(utc_value) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc_value, "%Y%m%dT%H%M%S").map_err(invalid)?;
        return Ok(EventStart::Zoned(naive.and_utc()));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").map_err(invalid)?;

    if let Some(tzid) = tzid {
        match tzid.parse::<Tz>() {
            Ok(tz) => {
                if let Some(zoned) = tz.from_local_datetime(&naive).earliest() {
                    return Ok(EventStart::Zoned(zoned.with_timezone(&Utc)));
                }
                debug!("{} does not exist in {}, treating as floating", naive, tzid);
            }
            Err(_) => debug!("Unknown TZID {}, treating {} as floating", tzid, naive),
        }
    }

    Ok(EventStart::Floating(naive))
}

/// Undo iCalendar TEXT escaping
fn unescape_text(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => text.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => text.push(escaped),
            Some(other) => {
                text.push('\\');
                text.push(other);
            }
            None => text.push('\\'),
        }
    }

    text
}
