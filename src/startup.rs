use crate::cli::Args;
use crate::components::calendar::check_calendar;
use crate::components::survey::SurveyAnswers;
use crate::components::{
    CalendarSource, HttpCalendarSource, SurveyRequest, SurveySubmitter, WebDriverSubmitter,
};
use crate::config::Config;
use crate::error::Error;
use crate::utils::time::{format_banner_date, local_now};
use chrono::DateTime;
use chrono_tz::Tz;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Load `.env` from the working directory if there is one.
///
/// Must run before `init_logging` so `RUST_LOG` set there takes effect.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Load a specific env file, returning whether it was found
pub fn load_env_from(path: &Path) -> bool {
    dotenvy::from_path(path).is_ok()
}

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fantoccini=warn,hyper=warn,reqwest=warn")),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the configuration, failing startup on a malformed override file
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// Survey filled; submitted unless it was a dry run
    Submitted { dry_run: bool },
    /// No conference in the slot today, nothing to do
    Skipped { reason: String },
    /// Calendar could not be fetched or parsed and `--force` was not given
    CalendarUnavailable,
    /// The survey driver reported failure
    SubmissionFailed,
}

impl CheckinOutcome {
    /// Process exit status for this outcome
    pub fn exit_status(&self) -> u8 {
        match self {
            CheckinOutcome::Submitted { .. } | CheckinOutcome::Skipped { .. } => 0,
            CheckinOutcome::CalendarUnavailable | CheckinOutcome::SubmissionFailed => 1,
        }
    }
}

/// Check the calendar and, if today's slot is a conference, submit the survey
pub async fn run_checkin<C, S>(
    config: &Config,
    args: &Args,
    now: DateTime<Tz>,
    calendar: &C,
    submitter: &S,
) -> CheckinOutcome
where
    C: CalendarSource + ?Sized,
    S: SurveySubmitter + ?Sized,
{
    let tz = now.timezone();
    let today = now.date_naive();

    info!("=== Conference Check-in ({}) ===", args.time);
    info!("Date: {}", format_banner_date(today));

    info!("Checking calendar...");
    let is_conference = match check_calendar(
        calendar,
        &config.calendar_url,
        &tz,
        today,
        args.time,
        &config.skip_keywords,
    )
    .await
    {
        Ok(classification) => {
            info!("  {}", classification.reason);
            if !classification.is_conference && !args.force {
                info!("No conference today. Skipping submission.");
                return CheckinOutcome::Skipped {
                    reason: classification.reason,
                };
            }
            classification.is_conference
        }
        Err(e) => {
            warn!("  Could not fetch calendar: {}", e);
            if !args.force {
                info!("  Use --force to submit anyway.");
                return CheckinOutcome::CalendarUnavailable;
            }
            info!("  Proceeding anyway due to --force flag.");
            true
        }
    };

    if !is_conference {
        info!("Calendar says no conference, submitting anyway due to --force flag.");
    }

    info!("Submitting survey...");
    let request = SurveyRequest {
        answers: SurveyAnswers::from_config(config, args.time, today),
        survey_url: config.survey_url.clone(),
        dry_run: args.dry_run,
    };

    if submitter.submit(&request).await {
        CheckinOutcome::Submitted {
            dry_run: args.dry_run,
        }
    } else {
        CheckinOutcome::SubmissionFailed
    }
}

/// Run one check-in against the real calendar and browser
pub async fn start(config: Config, args: Args) -> miette::Result<ExitCode> {
    let tz = config.tz()?;
    let calendar = HttpCalendarSource::new()?;
    let submitter = WebDriverSubmitter::new(config.webdriver_url.clone());

    let outcome = run_checkin(&config, &args, local_now(&tz), &calendar, &submitter).await;
    Ok(ExitCode::from(outcome.exit_status()))
}
