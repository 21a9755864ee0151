//! Directive execution - performs side effects and builds the reply

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::command::classifier::{AppKind, Directive, PowerAction};
use crate::command::host::{DryRunHost, Host, SystemHost};
use crate::command::platform::Platform;
use crate::core::config::AssistantConfig;
use crate::core::error::Result;

/// Outcome of executing one directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    /// What the user is shown
    pub text: String,
    /// Set when a side effect failed; never reflected in `text`
    pub failure: Option<ExecutionFailure>,
}

/// Diagnostic record of a side effect that did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure {
    pub directive: &'static str,
    pub message: String,
}

impl ActionResult {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}

/// Executes directives against a `Host`
pub struct Executor {
    host: Arc<dyn Host>,
    platform: Platform,
    home_url: String,
    weather_url: String,
    search_url: String,
    power_delay_secs: u32,
}

impl Executor {
    pub fn new(host: Arc<dyn Host>, config: &AssistantConfig) -> Self {
        Self {
            host,
            platform: Platform::current(),
            home_url: config.home_url.clone(),
            weather_url: config.weather_url.clone(),
            search_url: config.search_url.clone(),
            power_delay_secs: config.power_delay_secs,
        }
    }

    /// Real host, or the logging stand-in when `dry_run` is set
    pub fn from_config(config: &AssistantConfig) -> Self {
        let host: Arc<dyn Host> = if config.dry_run {
            Arc::new(DryRunHost)
        } else {
            Arc::new(SystemHost)
        };
        Self::new(host, config)
    }

    /// Override the detected platform family
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Perform `directive` and return the user-facing confirmation
    ///
    /// Never fails. A side effect that could not be performed is logged and
    /// recorded in `ActionResult::failure`, but the text is the same one the
    /// user would see on success.
    pub fn execute(&self, directive: &Directive) -> ActionResult {
        let (text, outcome) = match directive {
            Directive::Reply(text) => (text.clone(), Ok(())),
            Directive::ShowTime => (time_reply(Local::now().naive_local()), Ok(())),
            Directive::ShowDate => (date_reply(Local::now().naive_local()), Ok(())),
            Directive::LaunchApp(kind) => (launch_reply(*kind).to_string(), self.launch(*kind)),
            Directive::OpenWeather => (
                "Opening weather forecast for you...".to_string(),
                self.host.open_url(&self.weather_url),
            ),
            Directive::Search(term) => (
                format!("Searching Google for '{}'...", title_case(term)),
                self.host.open_url(&self.search_url_for(term)),
            ),
            Directive::SystemPower(action) => (power_reply(*action).to_string(), self.power(*action)),
        };

        let failure = outcome.err().map(|e| {
            tracing::warn!("{} failed: {}", directive.label(), e);
            ExecutionFailure {
                directive: directive.label(),
                message: e.to_string(),
            }
        });

        ActionResult { text, failure }
    }

    /// Search page URL with `term` percent-encoded
    pub fn search_url_for(&self, term: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(term))
    }

    fn launch(&self, kind: AppKind) -> Result<()> {
        match self.platform.app_command(kind) {
            Some(command) => self.host.spawn_detached(&command),
            None => self.host.open_url(&self.home_url),
        }
    }

    fn power(&self, action: PowerAction) -> Result<()> {
        let command = self.platform.power_command(action, self.power_delay_secs);
        tracing::info!("Issuing power command: {}", command);
        self.host.run_blocking(&command)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("platform", &self.platform)
            .field("home_url", &self.home_url)
            .field("weather_url", &self.weather_url)
            .field("search_url", &self.search_url)
            .field("power_delay_secs", &self.power_delay_secs)
            .finish_non_exhaustive()
    }
}

pub fn time_reply(now: NaiveDateTime) -> String {
    format!("The current time is {}", now.format("%I:%M %p"))
}

pub fn date_reply(now: NaiveDateTime) -> String {
    format!("Today is {}", now.format("%A, %B %d, %Y"))
}

fn launch_reply(kind: AppKind) -> &'static str {
    match kind {
        AppKind::Browser => "Opening your web browser...",
        AppKind::TextEditor => "Opening text editor...",
        AppKind::Calculator => "Opening calculator...",
        AppKind::MusicPlayer => "Opening music player...",
    }
}

fn power_reply(action: PowerAction) -> &'static str {
    match action {
        PowerAction::Shutdown => "Shutting down...",
        PowerAction::Restart => "Restarting...",
    }
}

/// Upper-case the first letter of every word, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
