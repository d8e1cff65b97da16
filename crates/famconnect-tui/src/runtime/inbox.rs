//! Inbox channel types.
//!
//! Effect handlers and the session subscription send `UiEvent`s here; the
//! runtime drains the receiver each loop iteration.

use std::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::Sender<UiEvent>;
pub type UiEventReceiver = mpsc::Receiver<UiEvent>;

pub fn channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::channel()
}
