//! Channel-based [`UserInput`] capability.
//!
//! [`PromptCoordinator`] owns the single active prompt. `prompt()` publishes a
//! [`PromptState`] on a `watch` channel and waits on a `oneshot` for the
//! frontend to call [`respond`](PromptCoordinator::respond).
//!
//! ```text
//! phase ── prompt(request) ──▶ watch<Option<PromptState>> ──▶ frontend
//!   ▲                                                            │
//!   └────────── oneshot<String> ◀──── respond(id, answer) ───────┘
//! ```

use crate::ports::user_input::{UserInput, UserInputError};
use async_trait::async_trait;
use htf_domain::{PromptId, PromptRequest, PromptResponse, PromptState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct ActivePrompt {
    id: PromptId,
    /// Button answers are trimmed; free-text answers are kept verbatim.
    trim_response: bool,
    response_tx: oneshot::Sender<String>,
}

/// The operator prompt plug.
///
/// At most one prompt is active at a time. Every exit path of `prompt()`
/// (answer, timeout, cancellation, or the future being dropped) clears the
/// active prompt and publishes `None`.
pub struct PromptCoordinator {
    next_id: AtomicU64,
    active: Mutex<Option<ActivePrompt>>,
    state_tx: watch::Sender<Option<PromptState>>,
    default_timeout: Option<Duration>,
    cancellation: CancellationToken,
}

impl PromptCoordinator {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(None);
        Self {
            next_id: AtomicU64::new(1),
            active: Mutex::new(None),
            state_tx,
            default_timeout: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Timeout applied to requests that do not set their own.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Cancelling `token` fails the active and all future prompts.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Watch the active prompt. `None` means no prompt is waiting.
    pub fn subscribe(&self) -> watch::Receiver<Option<PromptState>> {
        self.state_tx.subscribe()
    }

    pub fn current_prompt(&self) -> Option<PromptState> {
        self.state_tx.borrow().clone()
    }

    /// Answer the active prompt.
    ///
    /// Fails with [`UserInputError::UnknownPrompt`] when `id` is not the
    /// active prompt (already answered, timed out, or never issued).
    pub fn respond(&self, id: PromptId, response: impl Into<String>) -> Result<(), UserInputError> {
        let mut active = self.lock_active();
        let prompt = match active.take() {
            Some(prompt) if prompt.id == id => prompt,
            other => {
                *active = other;
                return Err(UserInputError::UnknownPrompt(id));
            }
        };
        self.clear_state(id);
        drop(active);

        let response = response.into();
        let response = if prompt.trim_response {
            response.trim().to_string()
        } else {
            response
        };
        debug!(prompt_id = %id, "Operator responded");

        // The waiting side may have been dropped between take() and here.
        if prompt.response_tx.send(response).is_err() {
            warn!(prompt_id = %id, "Prompt was abandoned before the response arrived");
        }
        Ok(())
    }

    /// Abandon the active prompt; its waiter fails with `Cancelled`.
    pub fn cancel_active(&self) -> Option<PromptId> {
        let mut active = self.lock_active();
        let prompt = active.take()?;
        self.clear_state(prompt.id);
        info!(prompt_id = %prompt.id, "Active prompt cancelled");
        Some(prompt.id)
    }

    fn start(
        &self,
        request: &PromptRequest,
    ) -> Result<(PromptId, oneshot::Receiver<String>), UserInputError> {
        let mut active = self.lock_active();
        if let Some(existing) = active.as_ref() {
            return Err(UserInputError::MultiplePrompts(existing.id));
        }

        let id = PromptId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (response_tx, response_rx) = oneshot::channel();
        *active = Some(ActivePrompt {
            id,
            trim_response: request.is_user_question() && !request.text_input,
            response_tx,
        });
        self.state_tx
            .send_replace(Some(PromptState::from_request(id, request)));
        Ok((id, response_rx))
    }

    fn finish(&self, id: PromptId) {
        let mut active = self.lock_active();
        if active.as_ref().is_some_and(|prompt| prompt.id == id) {
            *active = None;
        }
        self.clear_state(id);
    }

    fn clear_state(&self, id: PromptId) {
        self.state_tx.send_if_modified(|state| {
            if state.as_ref().is_some_and(|s| s.id == id) {
                *state = None;
                true
            } else {
                false
            }
        });
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActivePrompt>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PromptCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the active prompt when `prompt()` returns or its future is dropped.
struct ActiveGuard<'a> {
    coordinator: &'a PromptCoordinator,
    id: PromptId,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.coordinator.finish(self.id);
    }
}

#[async_trait]
impl UserInput for PromptCoordinator {
    async fn prompt(&self, request: PromptRequest) -> Result<PromptResponse, UserInputError> {
        request.validate()?;
        if self.cancellation.is_cancelled() {
            return Err(UserInputError::Cancelled);
        }

        let (id, response_rx) = self.start(&request)?;
        let _guard = ActiveGuard {
            coordinator: self,
            id,
        };
        info!(prompt_id = %id, "Waiting for operator: {}", request.message);

        let wait = async {
            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => Err(UserInputError::Cancelled),
                response = response_rx => response
                    .map(PromptResponse::new)
                    .map_err(|_| UserInputError::Cancelled),
            }
        };

        match request.timeout.or(self.default_timeout) {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(prompt_id = %id, "Prompt timed out after {:?}", limit);
                    Err(UserInputError::Timeout(limit))
                }
            },
            None => wait.await,
        }
    }
}
