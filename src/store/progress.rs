use std::sync::Arc;

use tokio::sync::watch;

use crate::models::CompletionPercentage;

/// Today's completion percentage, shared by the daily view and the footer.
///
/// Each writer derives the value from its own fresh fetch and overwrites
/// whatever is there; subscribers see the latest write.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    tx: Arc<watch::Sender<Option<CompletionPercentage>>>,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Option<CompletionPercentage> {
        *self.tx.borrow()
    }

    pub fn set(&self, value: Option<CompletionPercentage>) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CompletionPercentage>> {
        self.tx.subscribe()
    }
}
