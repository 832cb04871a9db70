//! User-facing notifications

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

impl Level {
    pub fn title(&self) -> &'static str {
        match self {
            Level::Success => "Success",
            Level::Info => "Info",
            Level::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            title: level.title().to_string(),
            message: message.into(),
        }
    }
}

/// Sink for notifications. Presentation is up to the implementor and never
/// feeds back into the caller.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn success(&mut self, message: &str) {
        self.notify(Notification::new(Level::Success, message));
    }

    fn info(&mut self, message: &str) {
        self.notify(Notification::new(Level::Info, message));
    }

    fn error(&mut self, message: &str) {
        self.notify(Notification::new(Level::Error, message));
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Collects notifications in order of arrival
#[derive(Debug, Default, Clone)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn of_level(&self, level: Level) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |n| n.level == level)
    }

    /// Take everything collected so far
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Notifier for Notifications {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}
