//! Background image encoding for accepted drafts.

use crate::event::AppEvent;
use log::debug;
use roster_core::{ImageEncoder, PendingSubmission};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the encoding step of a submission off the event loop.
#[derive(Clone)]
pub struct Submitter {
    encoder: Arc<dyn ImageEncoder>,
    sender: mpsc::Sender<AppEvent>,
}

impl Submitter {
    /// Create a submitter that reports completions on `sender`.
    pub fn new(encoder: Arc<dyn ImageEncoder>, sender: mpsc::Sender<AppEvent>) -> Self {
        Self { encoder, sender }
    }

    /// Encode the pending submission's image in a spawned task.
    pub fn spawn(&self, pending: PendingSubmission) {
        let encoder = self.encoder.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            debug!(
                "encoding image (path={})",
                pending.image().path.display()
            );
            let result = pending.encode(encoder.as_ref()).await;
            let _ = sender.send(AppEvent::ImageEncoded(result)).await;
        });
    }
}
