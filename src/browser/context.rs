use crate::config::UserAgentConfig;
use crate::FrontierError;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tracing::{error, info};

/// A single headless-browser process shared across every page session within
/// one crawler run (§4.4: "a browser context is shared across page sessions
/// within a single crawler run").
pub struct BrowserContext {
    browser: Browser,
}

impl BrowserContext {
    /// Launches a headless Chromium instance and spawns the background task
    /// that drains its CDP event handler, per chromiumoxide's launch contract.
    pub async fn launch(user_agent: &UserAgentConfig, navigation_timeout: Duration) -> crate::Result<Self> {
        let ua = format!(
            "{}/{} (+{}; {})",
            user_agent.crawler_name,
            user_agent.crawler_version,
            user_agent.contact_url,
            user_agent.contact_email
        );

        let config = BrowserConfig::builder()
            .user_agent(ua)
            .request_timeout(navigation_timeout)
            .build()
            .map_err(FrontierError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FrontierError::Browser(e.to_string()))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    error!(error = %e, "browser event handler stream error");
                }
            }
            info!("browser event handler stream closed");
        });

        Ok(Self { browser })
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Gracefully terminates the underlying headless process.
    pub async fn shutdown(mut self) -> crate::Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| FrontierError::Browser(e.to_string()))?;
        Ok(())
    }
}
