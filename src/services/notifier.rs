// src/services/notifier.rs
//
// User-facing notices ("toasts"). The services never print anything themselves;
// they hand a `Notice` to whatever front end is attached.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, title: title.into(), description: None }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.into(), description: None }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

// Default sink: notices end up in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(title = %notice.title, description, "notice")
            }
            NoticeLevel::Error => tracing::warn!(title = %notice.title, description, "notice"),
        }
    }
}

// Keeps every notice in memory; the CLI prints them and tests assert on them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn take(&self) -> Vec<Notice> {
        self.notices.lock().map(|mut n| std::mem::take(&mut *n)).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().ok().and_then(|n| n.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::success("Saved"));
        notifier.notify(Notice::error("Failed").with_description("Try again"));

        let notices = notifier.take();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[1].description.as_deref(), Some("Try again"));
        assert!(notifier.notices().is_empty());
    }
}
