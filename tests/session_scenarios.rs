//! End-to-end requests against the shipped knowledge base
//!
//! Side effects go to a recording host; nothing is launched for real.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use nova::brain::{Brain, EngineAdapter};
use nova::command::{Directive, Executor, Host, LaunchCommand, Platform, PowerAction};
use nova::core::config::AssistantConfig;
use nova::core::error::{NovaError, Result};
use nova::session::{Dispatcher, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Spawn(String),
    Open(String),
    Run(String),
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(NovaError::ExternalLaunch("not installed".into()))
        } else {
            Ok(())
        }
    }
}

impl Host for Recorder {
    fn spawn_detached(&self, command: &LaunchCommand) -> Result<()> {
        self.record(Call::Spawn(command.to_string()))
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.record(Call::Open(url.to_string()))
    }

    fn run_blocking(&self, command: &LaunchCommand) -> Result<()> {
        self.record(Call::Run(command.to_string()))
    }
}

fn shipped_brain() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/brain.toml")
}

fn session_with(host: Arc<Recorder>) -> Session {
    let brain = Brain::load(&shipped_brain()).unwrap();
    let executor = Executor::new(host, &AssistantConfig::default()).with_platform(Platform::Unix);
    Session::new(EngineAdapter::new(brain), executor)
}

#[test]
fn test_shipped_knowledge_base_loads() {
    let brain = Brain::load(&shipped_brain()).unwrap();
    assert!(!brain.is_empty());
    assert_eq!(brain.bot_name(), "NOVA");
}

#[test]
fn test_time_request() {
    let host = Arc::new(Recorder::default());
    let outcome = session_with(host.clone()).process("What time is it?");

    assert_eq!(outcome.directive, Directive::ShowTime);
    assert!(outcome.result.text.starts_with("The current time is "));
    assert!(outcome.result.text.ends_with("AM") || outcome.result.text.ends_with("PM"));
    assert!(host.calls().is_empty());
}

#[test]
fn test_failed_launch_still_confirms() {
    let host = Arc::new(Recorder {
        fail: true,
        ..Recorder::default()
    });
    let result = session_with(host.clone()).handle("open calculator");

    assert_eq!(result.text, "Opening calculator...");
    assert!(result.is_degraded());
    assert_eq!(host.calls(), vec![Call::Spawn("gnome-calculator".into())]);
}

#[test]
fn test_tagged_reply_launches_browser() {
    let host = Arc::new(Recorder::default());
    let result = session_with(host.clone()).handle("Open Chrome");

    assert_eq!(result.text, "Opening your web browser...");
    assert_eq!(host.calls(), vec![Call::Open("https://www.google.com".into())]);
}

#[test]
fn test_search_opens_encoded_url() {
    let host = Arc::new(Recorder::default());
    let result = session_with(host.clone()).handle("Search for Rust Lang!");

    assert_eq!(result.text, "Searching Google for 'Rust Lang'...");
    assert_eq!(
        host.calls(),
        vec![Call::Open("https://www.google.com/search?q=rust%20lang".into())]
    );
}

#[test]
fn test_weather_from_tag() {
    let host = Arc::new(Recorder::default());
    let outcome = session_with(host.clone()).process("Is it going to rain?");

    assert_eq!(outcome.directive, Directive::OpenWeather);
    assert_eq!(host.calls(), vec![Call::Open("https://weather.com".into())]);
}

#[test]
fn test_power_commands_from_tags() {
    let host = Arc::new(Recorder::default());
    let session = session_with(host.clone());

    let outcome = session.process("Shut down computer");
    assert_eq!(outcome.directive, Directive::SystemPower(PowerAction::Shutdown));
    assert_eq!(outcome.result.text, "Shutting down...");

    let outcome = session.process("reboot computer");
    assert_eq!(outcome.directive, Directive::SystemPower(PowerAction::Restart));

    assert_eq!(
        host.calls(),
        vec![
            Call::Run("sh -c sudo shutdown -h now".into()),
            Call::Run("sh -c sudo reboot".into()),
        ]
    );
}

#[test]
fn test_conversation_and_fallback() {
    let session = session_with(Arc::new(Recorder::default()));

    assert!(session.handle("help").text.contains("Here's what I can do"));
    assert_eq!(
        session.handle("My name is Ada").text,
        "Nice to meet you, ada!"
    );
    assert!(session
        .handle("colorless green ideas")
        .text
        .starts_with("I'm not sure how to respond"));
}

#[test]
fn test_two_quick_submissions_both_complete() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let host = Arc::new(Recorder::default());
    let session = Arc::new(session_with(host.clone()));
    let (dispatcher, mut completions) = Dispatcher::new(session, runtime.handle().clone());

    let first = dispatcher.submit("tell me a joke");
    let second = dispatcher.submit("open music");

    let mut ids = vec![
        completions.blocking_recv().unwrap().id,
        completions.blocking_recv().unwrap().id,
    ];
    ids.sort_by_key(|id| id.to_string());
    let mut expected = vec![first, second];
    expected.sort_by_key(|id| id.to_string());

    assert_eq!(ids, expected);
    assert_eq!(host.calls(), vec![Call::Spawn("rhythmbox".into())]);
}
