use crate::components::calendar::LectureTime;
use crate::config::Config;
use crate::error::{submission_error, CheckinResult};
use crate::utils::time::format_survey_date;
use chrono::NaiveDate;

/// Page 1 conference type option
pub const GENERAL_CONFERENCE: &str = "General Conference";

/// Likert prompts on page 2, in the order they appear
pub const QUESTIONS: [&str; 3] = [
    "The content of the lecture was relevant and helpful",
    "The lecture format was effective for my learning",
    "The lecturer was competent and taught effectively",
];

/// Response labels for ratings 1 through 5
pub const LIKERT_LABELS: [&str; 5] = [
    "Strongly disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// Label for a 1-5 rating
pub fn likert_label(rating: u8) -> CheckinResult<&'static str> {
    match rating {
        1..=5 => Ok(LIKERT_LABELS[usize::from(rating) - 1]),
        _ => Err(submission_error(&format!(
            "Rating {} is outside 1-5",
            rating
        ))),
    }
}

/// Everything typed or clicked into the survey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyAnswers {
    pub name: String,
    pub lecture_time: LectureTime,
    pub responses: Vec<u8>,
    pub comment: Option<String>,
    /// Today as MM/DD/YYYY
    pub date: String,
}

impl SurveyAnswers {
    /// Answers built from the configured defaults
    pub fn from_config(config: &Config, lecture_time: LectureTime, today: NaiveDate) -> Self {
        Self {
            name: config.name.clone(),
            lecture_time,
            responses: config.default_responses.clone(),
            comment: config.comment().map(str::to_string),
            date: format_survey_date(today),
        }
    }

    /// Each question paired with its response label.
    ///
    /// Extra responses are ignored and missing ones leave their question
    /// unanswered.
    pub fn labelled_responses(&self) -> CheckinResult<Vec<(&'static str, &'static str)>> {
        QUESTIONS
            .iter()
            .zip(&self.responses)
            .map(|(question, rating)| Ok((*question, likert_label(*rating)?)))
            .collect()
    }
}
