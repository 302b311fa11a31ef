//! Notices as log events.

use rocket_cart::{Notice, Notifier};

/// Log target used for notice events.
pub const NOTICE_TARGET: &str = "rocket_cart::notice";

/// Notifier that emits every notice as a `WARN` event.
///
/// Suits headless hosts where nobody watches for toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, notice: Notice) {
        tracing::warn!(target: NOTICE_TARGET, kind = ?notice, "{}", notice.message());
    }
}
