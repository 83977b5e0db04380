use super::models::CalendarEvent;

/// Outcome of checking today's events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_conference: bool,
    /// Human-readable explanation, only logged
    pub reason: String,
}

/// Decide whether today's events make it a conference day.
///
/// The first skip keyword found, scanning events then keywords in order,
/// vetoes the day.
pub fn is_conference_day(events: &[CalendarEvent], skip_keywords: &[String]) -> Classification {
    if events.is_empty() {
        return Classification {
            is_conference: false,
            reason: "No events found for today".to_string(),
        };
    }

    for event in events {
        let summary = event.summary.to_lowercase();
        for keyword in skip_keywords {
            if summary.contains(&keyword.to_lowercase()) {
                return Classification {
                    is_conference: false,
                    reason: format!(
                        "Found skip keyword '{}' in event: {}",
                        keyword, event.summary
                    ),
                };
            }
        }
    }

    let event_names = events
        .iter()
        .map(|e| e.summary.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Classification {
        is_conference: true,
        reason: format!("Conference day detected. Events: {}", event_names),
    }
}
