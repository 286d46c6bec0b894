use std::collections::VecDeque;
use std::sync::Mutex;

/// Severity of a transient user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        })
    }
}

/// Sink for transient, dismissible messages shown to the user.
pub trait NotificationPort: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Yes/no prompt shown before destructive or navigating actions.
pub trait ConfirmPort {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Notifier that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => tracing::error!(%kind, "{message}"),
            NotificationKind::Warning => tracing::warn!(%kind, "{message}"),
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(%kind, "{message}")
            }
        }
    }
}

/// Notifier that records every call, for tests and scripted sessions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(String, NotificationKind)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, NotificationKind)> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<(String, NotificationKind)> {
        self.entries().pop()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.entries().iter().filter(|(_, k)| *k == kind).count()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((message.to_string(), kind));
        }
    }
}

/// Confirm port that gives the same answer to every prompt.
#[derive(Clone, Copy, Debug)]
pub struct AutoConfirm(pub bool);

impl ConfirmPort for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Confirm port that replays queued answers and records prompts. Answers `false` once the queue
/// is empty.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ConfirmPort for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/notify/port.rs"]
mod tests;
