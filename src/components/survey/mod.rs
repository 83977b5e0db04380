mod answers;
mod driver;
mod page;
pub mod selectors;

pub use answers::{likert_label, SurveyAnswers, GENERAL_CONFERENCE, LIKERT_LABELS, QUESTIONS};
pub use driver::{
    click_next, run_survey, WebDriverSubmitter, ELEMENT_TIMEOUT, PAGE_SETTLE, SCOPED_TIMEOUT,
    SUBMIT_SETTLE,
};
pub use page::{browser_capabilities, SurveyPage, WebDriverPage};

/// One survey submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRequest {
    pub answers: SurveyAnswers,
    pub survey_url: String,
    /// Fill the form in a visible browser, pause for inspection and never submit
    pub dry_run: bool,
}
