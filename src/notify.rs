//! Transient user-visible notifications.

use std::fmt;
use std::sync::Mutex;

use crate::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<'a> dyn Notifier + 'a {
    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        });
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }

    /// Show the error side of `result` to the user and hand the result back unchanged.
    pub fn surface<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            self.error(e.user_message());
        }
        result
    }
}

/// Prints notices to the terminal: errors and warnings on stderr, the rest on stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice),
            NoticeLevel::Warning | NoticeLevel::Error => eprintln!("{}", notice),
        }
    }
}

/// Keeps every notice in memory. Used by tests and by callers that render notices themselves.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut n) = self.notices.lock() {
            n.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut n) = self.notices.lock() {
            n.push(notice);
        }
    }
}
