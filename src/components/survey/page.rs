use super::selectors::Selector;
use crate::error::{submission_error, CheckinResult};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;
use tracing::{debug, warn};

const READY_POLL: Duration = Duration::from_millis(100);

/// The browser page the survey is filled in, plus the operator watching it
#[async_trait]
pub trait SurveyPage: Send + Sync {
    /// Navigate to `url`
    async fn goto(&self, url: &str) -> CheckinResult<()>;

    /// Wait until the document has finished loading, at most `timeout`
    async fn wait_until_ready(&self, timeout: Duration) -> CheckinResult<()>;

    /// Whether `selector` matches anything right now, without waiting
    async fn is_present(&self, selector: &Selector) -> CheckinResult<bool>;

    /// Click the first match, waiting up to `timeout` for it to appear
    async fn click(&self, selector: &Selector, timeout: Duration) -> CheckinResult<()>;

    /// Click the first match, clear it and type `text`
    async fn fill(&self, selector: &Selector, text: &str, timeout: Duration) -> CheckinResult<()>;

    /// Fixed delay for the form's scripts to catch up
    async fn settle(&self, delay: Duration);

    /// Show `message` and block until the operator resumes
    async fn pause(&self, message: &str);

    /// End the browser session
    async fn close(&self) -> CheckinResult<()>;
}

/// A Chrome tab driven over WebDriver
#[derive(Debug, Clone)]
pub struct WebDriverPage {
    client: Client,
}

impl WebDriverPage {
    /// Start a browser session, headless unless the form should be visible
    pub async fn connect(webdriver_url: &str, headless: bool) -> CheckinResult<Self> {
        debug!("Connecting to WebDriver at {}", webdriver_url);
        let mut builder = ClientBuilder::native();
        builder.capabilities(browser_capabilities(headless));
        let client = builder.connect(webdriver_url).await?;
        Ok(Self { client })
    }

    async fn wait_for(&self, selector: &Selector, timeout: Duration) -> CheckinResult<Element> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(selector.locator())
            .await
            .map_err(|e| submission_error(&format!("{} not found: {}", selector, e)))
    }
}

#[async_trait]
impl SurveyPage for WebDriverPage {
    async fn goto(&self, url: &str) -> CheckinResult<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_until_ready(&self, timeout: Duration) -> CheckinResult<()> {
        let started = Instant::now();

        loop {
            let state = self
                .client
                .execute("return document.readyState;", Vec::new())
                .await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(submission_error("Survey page did not finish loading"));
            }
            sleep(READY_POLL).await;
        }
    }

    async fn is_present(&self, selector: &Selector) -> CheckinResult<bool> {
        let found = self.client.find_all(selector.locator()).await?;
        Ok(!found.is_empty())
    }

    async fn click(&self, selector: &Selector, timeout: Duration) -> CheckinResult<()> {
        self.wait_for(selector, timeout).await?.click().await?;
        Ok(())
    }

    async fn fill(&self, selector: &Selector, text: &str, timeout: Duration) -> CheckinResult<()> {
        let field = self.wait_for(selector, timeout).await?;
        field.click().await?;
        field.clear().await?;
        field.send_keys(text).await?;
        Ok(())
    }

    async fn settle(&self, delay: Duration) {
        sleep(delay).await;
    }

    async fn pause(&self, message: &str) {
        println!("\n{}", message);

        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = stdin.read_line(&mut line).await {
            warn!("Could not read from stdin, continuing: {}", e);
        }
    }

    async fn close(&self) -> CheckinResult<()> {
        self.client.clone().close().await?;
        Ok(())
    }
}

/// Chrome capabilities, headless unless the form should be visible
pub fn browser_capabilities(headless: bool) -> Capabilities {
    let mut args = vec!["--window-size=1280,1024"];
    if headless {
        args.push("--headless=new");
    }

    let mut capabilities = Capabilities::new();
    capabilities.insert("browserName".to_string(), json!("chrome"));
    capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    capabilities
}
