//! One worker per submission
//!
//! Each submitted utterance runs `Session::handle` on its own blocking
//! worker. When it finishes, the worker posts a `Completion` on a channel;
//! the front-end's rendering thread is the only consumer and the only owner
//! of visible state.
//!
//! Completions carry no ordering guarantee. If a second utterance is
//! submitted before the first finishes, replies may arrive in either order.
//! Requests are deliberately not queued behind one another.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::command::ActionResult;
use crate::core::types::RequestId;
use crate::session::Session;

/// Shown when a worker dies before producing a reply
pub const WORKER_FAILED: &str = "Sorry, something went wrong while handling that.";

/// A finished request, posted back to the rendering thread
#[derive(Debug, Clone)]
pub struct Completion {
    pub id: RequestId,
    pub utterance: String,
    pub result: ActionResult,
}

pub struct Dispatcher {
    session: Arc<Session>,
    runtime: Handle,
    completions: UnboundedSender<Completion>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiving end of its completion channel
    pub fn new(session: Arc<Session>, runtime: Handle) -> (Self, UnboundedReceiver<Completion>) {
        let (completions, rx) = mpsc::unbounded_channel();
        (
            Self {
                session,
                runtime,
                completions,
            },
            rx,
        )
    }

    /// Start handling `utterance` and return immediately
    ///
    /// Never blocks the caller. No timeout applies: a hung launch stalls
    /// only its own worker.
    pub fn submit(&self, utterance: impl Into<String>) -> RequestId {
        let id = RequestId::new();
        let utterance = utterance.into();
        tracing::debug!("Dispatching {} ({:?})", id, utterance);

        let session = Arc::clone(&self.session);
        let input = utterance.clone();
        let worker = self.runtime.spawn_blocking(move || session.handle(&input));

        let completions = self.completions.clone();
        self.runtime.spawn(async move {
            let result = match worker.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Worker for {} failed: {}", id, e);
                    ActionResult::reply(WORKER_FAILED)
                }
            };

            let completion = Completion {
                id,
                utterance,
                result,
            };
            if completions.send(completion).is_err() {
                tracing::debug!("Completion for {} dropped, front-end has gone", id);
            }
        });

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{EngineAdapter, KnowledgeEngine};
    use crate::command::{DryRunHost, Executor, Host, LaunchCommand};
    use crate::core::config::AssistantConfig;
    use crate::core::error::Result;
    use std::sync::mpsc as std_mpsc;
    use std::sync::Mutex;

    /// Blocks on "slow" until the test opens the gate
    struct Gated {
        gate: Mutex<std_mpsc::Receiver<()>>,
    }

    impl KnowledgeEngine for Gated {
        fn lookup(&self, query: &str) -> Result<String> {
            match query {
                "slow" => {
                    let _ = self.gate.lock().unwrap().recv();
                    Ok("slow done".into())
                }
                other => Ok(format!("{} done", other)),
            }
        }
    }

    /// Panics on any app launch, outside the engine's reach
    struct PanickingHost;

    impl Host for PanickingHost {
        fn spawn_detached(&self, _command: &LaunchCommand) -> Result<()> {
            panic!("launcher exploded")
        }
        fn open_url(&self, _url: &str) -> Result<()> {
            Ok(())
        }
        fn run_blocking(&self, _command: &LaunchCommand) -> Result<()> {
            Ok(())
        }
    }

    type Harness = (
        tokio::runtime::Runtime,
        Dispatcher,
        UnboundedReceiver<Completion>,
        std_mpsc::Sender<()>,
    );

    fn setup() -> Harness {
        setup_with(Arc::new(DryRunHost))
    }

    fn setup_with(host: Arc<dyn Host>) -> Harness {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let (open_gate, gate) = std_mpsc::channel();
        let engine = EngineAdapter::new(Gated {
            gate: Mutex::new(gate),
        });
        let executor = Executor::new(host, &AssistantConfig::default());
        let session = Arc::new(Session::new(engine, executor));
        let (dispatcher, rx) = Dispatcher::new(session, runtime.handle().clone());
        (runtime, dispatcher, rx, open_gate)
    }

    #[test]
    fn test_two_submissions_both_complete() {
        let (_rt, dispatcher, mut rx, _gate) = setup();

        let a = dispatcher.submit("first");
        let b = dispatcher.submit("second");
        assert_ne!(a, b);

        let mut seen = vec![rx.blocking_recv().unwrap(), rx.blocking_recv().unwrap()];
        seen.sort_by(|x, y| x.utterance.cmp(&y.utterance));

        assert_eq!(seen[0].utterance, "first");
        assert_eq!(seen[0].result.text, "first done");
        assert_eq!(seen[1].utterance, "second");
        assert_eq!(seen[1].result.text, "second done");
    }

    #[test]
    fn test_later_submission_can_finish_first() {
        let (_rt, dispatcher, mut rx, open_gate) = setup();

        let slow = dispatcher.submit("slow");
        let fast = dispatcher.submit("fast");

        let first = rx.blocking_recv().unwrap();
        assert_eq!(first.id, fast);

        open_gate.send(()).unwrap();
        let second = rx.blocking_recv().unwrap();
        assert_eq!(second.id, slow);
        assert_eq!(second.result.text, "slow done");
    }

    #[test]
    fn test_worker_panic_still_completes() {
        let (_rt, dispatcher, mut rx, _gate) = setup_with(Arc::new(PanickingHost));

        let id = dispatcher.submit("open calc");
        let completion = rx.blocking_recv().unwrap();
        assert_eq!(completion.id, id);
        assert_eq!(completion.result.text, WORKER_FAILED);
    }
}
