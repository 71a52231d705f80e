//! Local UI chrome state (open dialogs).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`chat`,
//! `query_cache`) so dialogs can be opened from anywhere in the tree.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state for dialogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Message text of the open share dialog; `None` when closed.
    pub share_message: Option<String>,
}

impl UiState {
    pub fn open_share(&mut self, message: impl Into<String>) {
        self.share_message = Some(message.into());
    }

    pub fn close_share(&mut self) {
        self.share_message = None;
    }
}
