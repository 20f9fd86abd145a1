//! Interactive terminal frontend for [`PromptCoordinator`].
//!
//! Watches the coordinator for the active prompt, renders it with
//! [`PromptView`], and turns lines typed by the operator into responses.

use super::prompt_view::PromptView;
use crate::output::stream::OutputStream;
use colored::Colorize;
use htf_application::PromptCoordinator;
use htf_domain::{ButtonId, PromptState};
use std::io::{self, BufRead};
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Read stdin on a dedicated thread, one message per line.
///
/// The channel closes on EOF or on a read error.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read operator input: {}", e);
                    break;
                }
            }
        }
        debug!("Operator input closed");
    });
    rx
}

/// Map one line of operator input to a response for `state`.
///
/// Returns `None` when the line does not answer the prompt and the operator
/// should be asked again.
///
/// - Text input: the line as typed, blank or not; an empty line takes the
///   default when there is one.
/// - Buttons: `1`-`3`, a button label (case-insensitive) or its token
///   (`button_1`); an empty line takes the default.
/// - Message only: any line acknowledges with an empty response.
pub fn parse_operator_input(state: &PromptState, line: &str) -> Option<String> {
    let line = line.trim_end_matches(['\r', '\n']);

    if state.text_input {
        if line.is_empty()
            && let Some(default) = &state.default_response
        {
            return Some(default.clone());
        }
        return Some(line.to_string());
    }

    if !state.is_user_question() {
        return Some(String::new());
    }

    let choice = line.trim();
    if choice.is_empty() {
        return state.default_response.clone();
    }

    let button = choice
        .parse::<u8>()
        .ok()
        .and_then(|n| ButtonId::from_number(n).ok())
        .or_else(|| ButtonId::from_token(choice))
        .or_else(|| {
            state
                .buttons()
                .find(|(_, label)| label.trim().eq_ignore_ascii_case(choice))
                .map(|(id, _)| id)
        })?;

    state
        .button_text(button)
        .map(|_| button.as_token().to_string())
}

/// Terminal frontend answering prompts from operator input lines.
///
/// Holds only a weak reference to the coordinator, so it stops once the
/// coordinator is dropped.
pub struct ConsolePromptFrontend {
    coordinator: Weak<PromptCoordinator>,
    states: watch::Receiver<Option<PromptState>>,
    cancellation: CancellationToken,
    lines: mpsc::UnboundedReceiver<String>,
    input_closed: bool,
    stream: OutputStream,
}

impl ConsolePromptFrontend {
    pub fn new(coordinator: &Arc<PromptCoordinator>, lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            coordinator: Arc::downgrade(coordinator),
            states: coordinator.subscribe(),
            cancellation: coordinator.cancellation().clone(),
            lines,
            input_closed: false,
            stream: OutputStream::Stdout,
        }
    }

    pub fn with_stream(mut self, stream: OutputStream) -> Self {
        self.stream = stream;
        self
    }

    /// Serve prompts until cancellation or until the coordinator is dropped.
    ///
    /// Lines typed while no prompt is shown are discarded. Once input is
    /// closed, every prompt is cancelled as soon as it appears.
    pub async fn run(mut self) {
        let token = self.cancellation.clone();

        loop {
            let state = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                state = next_prompt(&mut self.states) => match state {
                    Some(state) => state,
                    None => break,
                },
                line = self.lines.recv(), if !self.input_closed => {
                    match line {
                        Some(line) => debug!("Ignoring input with no active prompt: {:?}", line),
                        None => self.input_closed = true,
                    }
                    continue;
                }
            };

            if self.input_closed {
                warn!(prompt_id = %state.id, "Operator input is closed, cancelling prompt");
                match self.coordinator.upgrade() {
                    Some(coordinator) => {
                        coordinator.cancel_active();
                    }
                    None => break,
                }
                continue;
            }

            self.stream.print(PromptView::render(&state));
            if !self.answer(&state).await {
                break;
            }
        }
        debug!("Console prompt frontend stopped");
    }

    /// Read lines until `state` is answered or withdrawn.
    /// Returns `false` when the frontend should stop.
    async fn answer(&mut self, state: &PromptState) -> bool {
        let token = self.cancellation.clone();

        loop {
            self.stream.print(format_args!("{} ", ">".cyan().bold()));

            // A state change outranks input so a line typed for the next
            // prompt is never spent on a withdrawn one.
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    self.stream.println("");
                    return false;
                }
                changed = self.states.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                    let still_active = self
                        .states
                        .borrow_and_update()
                        .as_ref()
                        .is_some_and(|current| current.id == state.id);
                    if !still_active {
                        self.stream.println("");
                        self.stream.println("Prompt withdrawn.".yellow());
                        return true;
                    }
                }
                line = self.lines.recv() => {
                    let Some(coordinator) = self.coordinator.upgrade() else {
                        return false;
                    };
                    let Some(line) = line else {
                        self.stream.println("");
                        warn!(prompt_id = %state.id, "Operator input closed while prompt was active");
                        self.input_closed = true;
                        coordinator.cancel_active();
                        return true;
                    };

                    match parse_operator_input(state, &line) {
                        Some(response) => {
                            if let Err(e) = coordinator.respond(state.id, response) {
                                warn!("Response not delivered: {}", e);
                            }
                            return true;
                        }
                        None => self.stream.println(Self::invalid_choice_hint(state).yellow()),
                    }
                }
            }
        }
    }

    fn invalid_choice_hint(state: &PromptState) -> String {
        let numbers: Vec<String> = state
            .buttons()
            .map(|(id, _)| id.number().to_string())
            .collect();
        format!("Please choose one of: {}", numbers.join(", "))
    }
}

async fn next_prompt(rx: &mut watch::Receiver<Option<PromptState>>) -> Option<PromptState> {
    let state = rx.wait_for(Option::is_some).await.ok()?;
    state.clone()
}
