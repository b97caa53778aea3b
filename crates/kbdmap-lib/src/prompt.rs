//! Operator input — one line per question, with interrupt awareness.

use std::io::{BufRead, ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// How often a waiting prompt re-checks the running flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of waiting for one operator response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// A line of text, trimmed.
    Input(String),
    /// The operator typed `exit`.
    ExitRequested,
    /// Interrupt signal, or input closed.
    Interrupted,
}

impl InputOutcome {
    /// Classify a raw input line.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            InputOutcome::ExitRequested
        } else {
            InputOutcome::Input(line.to_string())
        }
    }
}

/// Source of operator responses.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> InputOutcome;
}

/// Reads stdin on a background thread so a wait can be cut short by Ctrl+C.
///
/// `running` is cleared by the interrupt handler.
pub struct StdinPrompt {
    lines: Receiver<String>,
    running: &'static AtomicBool,
}

impl StdinPrompt {
    pub fn new(running: &'static AtomicBool) -> Self {
        let (line_tx, line_rx) = mpsc::channel::<String>();
        std::thread::spawn(move || forward_lines(std::io::stdin().lock(), &line_tx));
        StdinPrompt {
            lines: line_rx,
            running,
        }
    }
}

/// Send each line of `reader` to `tx` until EOF, a read error, or the
/// receiver goes away.
///
/// Bytes that are not valid UTF-8 are replaced, so the line still counts.
fn forward_lines(mut reader: impl BufRead, tx: &Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                log::debug!("stdin closed");
                return;
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.send(line).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("reading stdin: {e}");
                return;
            }
        }
    }
}

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> InputOutcome {
        print!("{question}");
        std::io::stdout().flush().ok();

        loop {
            if !self.running.load(Ordering::SeqCst) {
                return InputOutcome::Interrupted;
            }
            match self.lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => return InputOutcome::from_line(&line),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return InputOutcome::Interrupted,
            }
        }
    }
}

/// Replays fixed lines, then reports [`InputOutcome::Interrupted`].
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: std::collections::VecDeque<String>,
    /// Questions asked so far.
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            lines: lines.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> InputOutcome {
        self.asked.push(question.to_string());
        match self.lines.pop_front() {
            Some(line) => InputOutcome::from_line(&line),
            None => InputOutcome::Interrupted,
        }
    }
}
