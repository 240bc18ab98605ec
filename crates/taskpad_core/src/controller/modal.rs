//! Singleton reminder modal state.

use log::debug;

/// How the user closed the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    DismissButton,
    OutsideClick,
    EscapeKey,
}

impl DismissReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloseButton => "close_button",
            Self::DismissButton => "dismiss_button",
            Self::OutsideClick => "outside_click",
            Self::EscapeKey => "escape_key",
        }
    }
}

/// At most one reminder is visible; a newer message replaces the shown one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderModal {
    message: Option<String>,
}

impl ReminderModal {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Hides the modal. Returns whether it was visible.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        let was_visible = self.message.take().is_some();
        debug!(
            "event=modal_dismiss module=controller reason={} was_visible={was_visible}",
            reason.as_str()
        );
        was_visible
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
