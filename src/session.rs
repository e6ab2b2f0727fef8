//! Display state for a front end driving the pipeline.
//!
//! Every run gets a [`RunToken`]. Starting a run makes it the only one whose
//! outcome may change the displayed state; results from older runs are
//! dropped when they arrive.

use crate::credentials::KeyValueStore;
use crate::error::{ErrorKind, Notice};
use crate::pipeline::{PostGenerator, PreparedRun};
use crate::provider::CompletionProvider;
use crate::types::{DecodedPost, GeneratedPost, Platform};
use crate::Error;
use std::fmt;
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;
use uuid::Uuid;

/// Identifies one invocation of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken(Uuid);

impl RunToken {
    pub fn new() -> Self {
        RunToken(Uuid::new_v4())
    }
}

impl Default for RunToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What went wrong, in the form the user sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub notice: Notice,
}

impl From<&Error> for ErrorDetail {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            notice: error.notice(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Idle,
    Running(RunToken),
    Succeeded(GeneratedPost),
    Failed(ErrorDetail),
}

impl PipelineState {
    pub fn is_running(&self) -> bool {
        matches!(self, PipelineState::Running(_))
    }

    pub fn post(&self) -> Option<&GeneratedPost> {
        match self {
            PipelineState::Succeeded(post) => Some(post),
            _ => None,
        }
    }
}

/// Owns the displayed [`PipelineState`].
#[derive(Debug, Default)]
pub struct Session {
    state: PipelineState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Start a run: any previous result is discarded immediately.
    pub fn begin(&mut self) -> RunToken {
        let token = RunToken::new();
        debug!(%token, "run started");
        self.state = PipelineState::Running(token);
        token
    }

    /// Apply the outcome of the run identified by `token`.
    ///
    /// Returns `false` and leaves state alone if a newer run has started
    /// since (or this run was already resolved). A cancelled run returns
    /// the session to `Idle`.
    pub fn resolve(&mut self, token: RunToken, outcome: Result<GeneratedPost, Error>) -> bool {
        if self.state != PipelineState::Running(token) {
            debug!(%token, "discarding stale result");
            return false;
        }
        self.state = match outcome {
            Ok(post) => PipelineState::Succeeded(post),
            Err(Error::Cancelled) => PipelineState::Idle,
            Err(error) => PipelineState::Failed(ErrorDetail::from(&error)),
        };
        true
    }

    /// Validate and start a run in the background.
    ///
    /// Precondition failures (`EmptyIdea`, `MissingCredential`) are returned
    /// without touching the displayed state.
    pub fn submit<S, P>(
        &mut self,
        generator: &Arc<PostGenerator<S, P>>,
        idea: &str,
        platform: Platform,
    ) -> Result<GenerationTask, Error>
    where
        S: KeyValueStore + 'static,
        P: CompletionProvider,
    {
        let run = generator.prepare(idea, platform)?;
        let token = self.begin();
        Ok(GenerationTask::spawn(Arc::clone(generator), token, run))
    }
}

/// A pipeline run executing on the tokio runtime.
pub struct GenerationTask {
    token: RunToken,
    handle: JoinHandle<Result<GeneratedPost, Error>>,
}

impl GenerationTask {
    pub fn spawn<S, P>(generator: Arc<PostGenerator<S, P>>, token: RunToken, run: PreparedRun) -> Self
    where
        S: KeyValueStore + 'static,
        P: CompletionProvider,
    {
        let handle = tokio::spawn(async move {
            generator
                .execute(&run)
                .await
                .map(DecodedPost::into_post)
        });
        Self { token, handle }
    }

    pub fn token(&self) -> RunToken {
        self.token
    }

    /// Abandon the run. A later [`join`](Self::join) yields `Error::Cancelled`.
    pub fn cancel(&self) {
        debug!(token = %self.token, "run cancelled");
        self.handle.abort();
    }

    /// A handle that can abandon the run after the task itself has been moved.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run to end.
    pub async fn join(self) -> (RunToken, Result<GeneratedPost, Error>) {
        let outcome = match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(Error::Cancelled),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        };
        (self.token, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        assert_eq!(Session::new().state(), &PipelineState::Idle);
    }

    #[test]
    fn test_begin_discards_previous_result() {
        let mut session = Session::new();
        let first = session.begin();
        assert!(session.resolve(first, Ok(GeneratedPost::new("T", "C"))));
        assert!(session.state().post().is_some());

        let second = session.begin();
        assert_eq!(session.state(), &PipelineState::Running(second));
        assert!(session.state().post().is_none());
    }

    #[test]
    fn test_only_latest_run_updates_state() {
        let mut session = Session::new();
        let older = session.begin();
        let newer = session.begin();

        assert!(!session.resolve(older, Ok(GeneratedPost::new("old", "old"))));
        assert_eq!(session.state(), &PipelineState::Running(newer));

        assert!(session.resolve(newer, Ok(GeneratedPost::new("new", "new"))));
        assert!(!session.resolve(older, Ok(GeneratedPost::new("old", "old"))));
        assert_eq!(session.state().post().unwrap().title, "new");
    }

    #[test]
    fn test_failure_is_recorded_with_notice() {
        let mut session = Session::new();
        let token = session.begin();
        session.resolve(token, Err(Error::network("connection reset")));
        match session.state() {
            PipelineState::Failed(detail) => {
                assert_eq!(detail.kind, ErrorKind::Network);
                assert_eq!(detail.notice.title, "Generation Failed");
            }
            other => panic!("Expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut session = Session::new();
        let token = session.begin();
        assert!(session.resolve(token, Err(Error::Cancelled)));
        assert_eq!(session.state(), &PipelineState::Idle);
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(RunToken::new(), RunToken::new());
    }
}
