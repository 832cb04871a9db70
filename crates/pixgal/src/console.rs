use colored::Colorize;
use pixgal_gallery::{Level, Notification, Notifier};

/// Prints notifications to stderr so stdout stays clean for cards and JSON
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        let title = match notification.level {
            Level::Success => format!("✓ {}", notification.title).green().bold(),
            Level::Info => format!("ℹ {}", notification.title).blue().bold(),
            Level::Error => format!("✗ {}", notification.title).red().bold(),
        };
        eprintln!("{} {}", title, notification.message);
    }
}
