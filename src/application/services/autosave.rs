//! Debounced content autosave: edits are batched behind a quiescence
//! window and only the latest pending write per node survives. An in-flight
//! write is not cancellable; failures are logged once and never retried.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::ports::node_repository::NodeRepository;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug)]
struct PendingSave {
    node_id: i32,
    content: String,
}

#[derive(Clone)]
pub struct Autosave {
    tx: mpsc::UnboundedSender<PendingSave>,
}

impl Autosave {
    pub fn spawn(nodes: Arc<dyn NodeRepository>, user_id: i32, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(nodes, user_id, debounce, rx));
        Self { tx }
    }

    /// Queues the latest content for a node, superseding any pending write
    /// for the same node.
    pub fn queue(&self, node_id: i32, content: String) {
        let _ = self.tx.send(PendingSave { node_id, content });
    }
}

async fn run(
    nodes: Arc<dyn NodeRepository>,
    user_id: i32,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<PendingSave>,
) {
    while let Some(first) = rx.recv().await {
        let mut latest: HashMap<i32, String> = HashMap::new();
        latest.insert(first.node_id, first.content);

        // Coalesce edits until the editor goes quiet for a full window.
        loop {
            match tokio::time::timeout(debounce, rx.recv()).await {
                Ok(Some(next)) => {
                    latest.insert(next.node_id, next.content);
                }
                Ok(None) | Err(_) => break,
            }
        }

        for (node_id, content) in latest {
            match nodes.update_content(node_id, &content, user_id).await {
                Ok(Some(_)) => {}
                Ok(None) => tracing::debug!(node_id, "autosave target no longer exists"),
                Err(e) => tracing::warn!(node_id, error = ?e, "autosave write failed"),
            }
        }
    }
}
