//! The long-polling loop: fetch a batch, schedule dispatch for each update,
//! advance and persist the offset.

use std::sync::Arc;

use tracing::{error, info};

use rubot_core::Result;

use crate::client::Robot;
use crate::dispatch::{self, Handlers};
use crate::offset::OffsetStore;

impl Robot {
    /// Runs the poll loop forever. Errors from a poll iteration are logged and
    /// followed by the configured backoff; the loop itself never terminates.
    ///
    /// The handler registry is snapshotted when the loop starts, so register
    /// handlers first.
    pub async fn run(&self) -> Result<()> {
        let handlers = Arc::new(self.handlers.clone());
        let store = self.offset_store();
        let mut offset = store.load();
        info!(offset = ?offset, "bot starting, polling for updates");

        loop {
            match self.poll_once(&handlers, &store, &mut offset).await {
                Ok(()) => tokio::time::sleep(self.config.poll_interval).await,
                Err(e) => {
                    error!(error = %e, "error in poll loop");
                    tokio::time::sleep(self.config.error_backoff).await;
                }
            }
        }
    }

    /// One poll iteration: fetch updates since `offset`, spawn a dispatch task
    /// per update, then adopt and persist the response's next offset.
    ///
    /// The offset is persisted as soon as the response carries one, without
    /// waiting for the spawned dispatches — delivery is at-most-once. Handler
    /// failures never propagate here; each task logs its own error.
    pub async fn poll_once(
        &self,
        handlers: &Arc<Handlers>,
        store: &OffsetStore,
        offset: &mut Option<String>,
    ) -> Result<()> {
        let batch = self
            .get_updates(offset.as_deref(), Some(self.config.updates_limit))
            .await?;

        for update in batch.updates {
            let bot = self.clone();
            let handlers = Arc::clone(handlers);
            tokio::spawn(async move {
                if let Err(e) = dispatch::process_update(bot, handlers, update).await {
                    error!(error = %e, "update handler failed");
                }
            });
        }

        if let Some(next_offset) = batch.next_offset_id {
            *offset = Some(next_offset.clone());
            store.save(&next_offset)?;
        }
        Ok(())
    }
}
