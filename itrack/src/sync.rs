use futures::stream::{self, StreamExt};

use crate::client::TrackingClient;
use crate::error::TrackingClientError;
use crate::snapshot::TrackingSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Success,
    Failed,
}

/// Result of syncing one device in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub device_id: String,
    pub result: Result<TrackingSnapshot, TrackingClientError>,
}

impl SyncOutcome {
    pub fn status(&self) -> SyncStatus {
        match self.result {
            Ok(_) => SyncStatus::Success,
            Err(_) => SyncStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn snapshot(&self) -> Option<&TrackingSnapshot> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&TrackingClientError> {
        self.result.as_ref().err()
    }
}

impl TrackingClient {
    /// Fetches a snapshot for every device, in input order.
    ///
    /// A failing device becomes a [`SyncStatus::Failed`] outcome and never
    /// stops the others. With a concurrency above 1 up to that many requests
    /// are in flight; the output order still matches the input.
    pub async fn batch_sync<I>(&self, device_ids: I) -> Vec<SyncOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let outcomes: Vec<SyncOutcome> = if self.concurrency <= 1 {
            let mut outcomes = Vec::new();
            for device_id in device_ids {
                outcomes.push(self.outcome(device_id.as_ref()).await);
            }
            outcomes
        } else {
            stream::iter(device_ids)
                .map(|device_id| async move { self.outcome(device_id.as_ref()).await })
                .buffered(self.concurrency)
                .collect()
                .await
        };

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            devices = outcomes.len(),
            failed,
            concurrency = self.concurrency,
            "Batch sync finished"
        );
        outcomes
    }

    /// Per-record trigger used by the host.
    pub async fn sync_one(&self, device_id: &str) -> Result<TrackingSnapshot, TrackingClientError> {
        self.snapshot(device_id).await
    }

    /// Scheduled-job entry point used by the host.
    pub async fn sync_many<I>(&self, device_ids: I) -> Vec<SyncOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.batch_sync(device_ids).await
    }

    async fn outcome(&self, device_id: &str) -> SyncOutcome {
        let result = self.snapshot(device_id).await;
        if let Err(e) = &result {
            tracing::debug!(device_id = %device_id, error = %e, "Device sync failed");
        }
        SyncOutcome {
            device_id: device_id.to_string(),
            result,
        }
    }
}
