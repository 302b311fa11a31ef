//! User-facing notices.
//!
//! Cart operations never return errors; they end in at most one notice.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// A message surfaced to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Requested amount is above the available stock.
    StockExceeded,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing an amount failed.
    UpdateFailed,
    /// The cart changed but the snapshot write failed.
    SaveFailed,
}

impl Notice {
    /// Text shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::StockExceeded => "requested quantity exceeds stock",
            Notice::AddFailed => "product addition failed",
            Notice::RemoveFailed => "product removal failed",
            Notice::UpdateFailed => "quantity update failed",
            Notice::SaveFailed => "cart could not be saved",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Fire-and-forget sink for notices, the toast of the storefront.
///
/// Implementations must not panic or block for long.
pub trait Notifier: Send + Sync {
    /// Surface an error notice.
    fn error(&self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn error(&self, notice: Notice) {
        (**self).error(notice);
    }
}

/// Notifier that keeps every notice it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Number of notices received.
    pub fn len(&self) -> usize {
        self.notices.lock().map(|n| n.len()).unwrap_or(0)
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
