//! An observer that forwards each event to a caller-supplied closure.

use std::sync::Arc;

use async_trait::async_trait;
use graphwalk_core::{GraphError, TraversalEvent, TraversalObserver};

/// The closure type a [`CallbackObserver`] drives.
pub type EventCallback =
    Arc<dyn Fn(&dyn TraversalEvent) -> Result<(), GraphError> + Send + Sync>;

/// Bridges the engine to arbitrary consumer code.
///
/// A rendering front end registers the closure that highlights nodes; the
/// engine stays unaware of how steps are displayed. The callback runs
/// synchronously inside event dispatch, so it should return quickly.
pub struct CallbackObserver {
    callback: EventCallback,
}

impl CallbackObserver {
    /// Wrap a closure as an observer.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&dyn TraversalEvent) -> Result<(), GraphError> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }
}

impl std::fmt::Debug for CallbackObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackObserver").finish_non_exhaustive()
    }
}

#[async_trait]
impl TraversalObserver for CallbackObserver {
    async fn handle_event(&self, event: Box<dyn TraversalEvent>) -> Result<(), GraphError> {
        (self.callback)(event.as_ref())
    }
}
