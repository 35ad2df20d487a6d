use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::io;
use std::sync::{Mutex, PoisonError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

/// Line-oriented user interaction used by the chat node
#[async_trait]
pub trait Console: Send + Sync + Debug {
    /// Show `prompt` and read one line. `Ok(None)` means the input is closed.
    async fn read_line(&self, prompt: &str) -> io::Result<Option<String>>;

    /// Display a message to the user.
    fn show(&self, text: &str);
}

/// Console backed by the process's stdin and stdout
#[derive(Debug)]
pub struct StdConsole {
    stdin: tokio::sync::Mutex<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = self.stdin.lock().await.read_line(&mut line).await?;
        Ok((read > 0).then_some(line))
    }

    fn show(&self, text: &str) {
        println!("{text}");
    }
}

/// Console that replays queued lines and records everything it is asked to show
///
/// Once the queue is empty every read reports closed input, or fails with
/// the error kind set through [`ScriptedConsole::fail_when_drained`].
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<String>>,
    drained_error: Option<io::ErrorKind>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            transcript: Mutex::new(Vec::new()),
            drained_error: None,
        }
    }

    /// Make reads past the last queued line fail with `kind` instead of
    /// reporting closed input.
    pub fn fail_when_drained(mut self, kind: io::ErrorKind) -> Self {
        self.drained_error = Some(kind);
        self
    }

    /// Prompts and messages in the order they were produced
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.input.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn record(&self, text: &str) {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        self.record(prompt);
        let line = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match (line, self.drained_error) {
            (None, Some(kind)) => Err(io::Error::new(kind, "scripted input failure")),
            (line, _) => Ok(line),
        }
    }

    fn show(&self, text: &str) {
        self.record(text);
    }
}
