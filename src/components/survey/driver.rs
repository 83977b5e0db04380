use super::answers::GENERAL_CONFERENCE;
use super::page::{SurveyPage, WebDriverPage};
use super::selectors;
use super::SurveyRequest;
use crate::components::SurveySubmitter;
use crate::error::{submission_error, CheckinResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Extra wait after page loads for the form's scripts to settle
pub const PAGE_SETTLE: Duration = Duration::from_millis(1000);
/// Wait after the final submit
pub const SUBMIT_SETTLE: Duration = Duration::from_millis(2000);
/// Upper bound for the page load and for required elements to appear
pub const ELEMENT_TIMEOUT: Duration = Duration::from_secs(30);
/// How long a question-scoped answer lookup may take before falling back
pub const SCOPED_TIMEOUT: Duration = Duration::from_secs(5);

/// Fills the survey in a WebDriver-controlled Chrome
#[derive(Debug, Clone)]
pub struct WebDriverSubmitter {
    webdriver_url: String,
}

impl WebDriverSubmitter {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
        }
    }
}

#[async_trait]
impl SurveySubmitter for WebDriverSubmitter {
    async fn submit(&self, request: &SurveyRequest) -> bool {
        // Visible browser in dry-run so the operator can inspect the form
        let page = match WebDriverPage::connect(&self.webdriver_url, !request.dry_run).await {
            Ok(page) => page,
            Err(e) => {
                error!("Error during form submission: {}", e);
                return false;
            }
        };

        run_survey(&page, request).await
    }
}

/// Fill (and unless dry-run, submit) the survey on `page`.
///
/// Failures are logged and reported as `false`. The page is closed either way.
pub async fn run_survey<P: SurveyPage + ?Sized>(page: &P, request: &SurveyRequest) -> bool {
    let succeeded = match fill_form(page, request).await {
        Ok(()) => true,
        Err(e) => {
            error!("Error during form submission: {}", e);
            if request.dry_run {
                page.pause("Browser will stay open for debugging. Press Enter to close it.")
                    .await;
            }
            false
        }
    };

    if let Err(e) = page.close().await {
        warn!("Failed to close browser session: {}", e);
    }

    succeeded
}

async fn fill_form<P: SurveyPage + ?Sized>(page: &P, request: &SurveyRequest) -> CheckinResult<()> {
    let answers = &request.answers;

    info!("Loading survey: {}", request.survey_url);
    page.goto(&request.survey_url).await?;
    page.wait_until_ready(ELEMENT_TIMEOUT).await?;
    page.settle(PAGE_SETTLE).await;

    // Page 1: name and conference type
    info!("Filling Page 1...");
    page.fill(&selectors::name_field(), &answers.name, ELEMENT_TIMEOUT)
        .await?;
    page.click(&selectors::option(GENERAL_CONFERENCE), ELEMENT_TIMEOUT)
        .await?;

    if request.dry_run {
        page.pause("[DRY RUN] Page 1 filled. Check the browser, then press Enter to continue.")
            .await;
    }

    click_next(page).await?;
    page.settle(PAGE_SETTLE).await;

    // Page 2: date, lecture time, ratings, comment
    info!("Filling Page 2...");

    // The form pre-fills the date in the wrong format
    page.fill(&selectors::date_field(), &answers.date, ELEMENT_TIMEOUT)
        .await?;
    info!("  Date: {}", answers.date);

    let time_label = answers.lecture_time.label();
    page.click(&selectors::option(time_label), ELEMENT_TIMEOUT)
        .await?;
    info!("  Time: {}", time_label);

    for (index, (question, label)) in answers.labelled_responses()?.into_iter().enumerate() {
        info!("  Q{}: {}", index + 1, label);
        answer_question(page, question, label, index).await?;
    }

    if let Some(comment) = &answers.comment {
        page.fill(&selectors::comment_field(), comment, ELEMENT_TIMEOUT)
            .await?;
        info!("  Comment: {}...", comment.chars().take(50).collect::<String>());
    }

    if request.dry_run {
        page.pause("[DRY RUN] Page 2 filled. Nothing will be submitted; press Enter to close the browser.")
            .await;
    } else {
        click_next(page).await?;
        page.settle(SUBMIT_SETTLE).await;
        info!("Survey submitted successfully!");
    }

    Ok(())
}

/// Click `label` inside the question's own container, falling back to its
/// position among all matching labels on the page
async fn answer_question<P: SurveyPage + ?Sized>(
    page: &P,
    question: &str,
    label: &str,
    index: usize,
) -> CheckinResult<()> {
    let scoped = selectors::scoped_response(question, label);

    if let Err(e) = page.click(&scoped, SCOPED_TIMEOUT).await {
        debug!(
            "Scoped answer lookup failed for question {} ({}), using position {}",
            index + 1,
            e,
            index
        );
        page.click(&selectors::nth_response(label, index), ELEMENT_TIMEOUT)
            .await?;
    }

    Ok(())
}

/// Click the first "next" control that is present on the page
pub async fn click_next<P: SurveyPage + ?Sized>(page: &P) -> CheckinResult<()> {
    for selector in selectors::next_controls() {
        if page.is_present(&selector).await? {
            debug!("Advancing with {}", selector);
            return page.click(&selector, ELEMENT_TIMEOUT).await;
        }
    }

    Err(submission_error("No next/submit control found on the page"))
}
