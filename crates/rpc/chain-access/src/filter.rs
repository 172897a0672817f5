//! Bloom filter servicing.
//!
//! Log filtering over historical blocks is driven by bloom-bit retrievals.
//! One filtering session is serviced by a fixed pool of workers that pull
//! retrieval batches until the session drains or the caller cancels; the
//! session object itself is owned by the filter system, not by this layer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::access::ChainAccess;

/// Blocks covered by one bloom-bit section on a stateless client.
pub const BLOOM_BITS_BLOCKS: u64 = 4096;

/// One bloom filtering session.
///
/// Workers call [`FilterSession::service_batch`] repeatedly; the session
/// multiplexes the pulled requests onto the retrieval protocol and hands
/// results back to the filter system internally.
#[async_trait]
pub trait FilterSession: Send + Sync {
    /// Pull and service up to `batch_size` bloom retrieval requests,
    /// waiting at most `wait` to fill a partial batch.
    ///
    /// Returns `false` once the session is drained and workers should stop.
    async fn service_batch(&self, batch_size: usize, wait: Duration) -> bool;
}

impl ChainAccess {
    /// Bloom filtering geometry: (blocks per section, indexed sections).
    pub fn bloom_status(&self) -> (u64, u64) {
        (BLOOM_BITS_BLOCKS, self.registry().bloom_sections())
    }

    /// Spawn the worker pool servicing one filtering session.
    ///
    /// Exactly `filter.workers` tasks are spawned; each loops pulling
    /// batches of `filter.batch_size` with the configured wait interval.
    /// Workers exit when the session drains or the token cancels. The
    /// returned handles let the caller await teardown.
    pub fn service_filter(
        &self,
        cancel: &CancellationToken,
        session: Arc<dyn FilterSession>,
    ) -> Vec<JoinHandle<()>> {
        let filter = &self.settings().filter;
        let batch_size = filter.batch_size;
        let wait = filter.wait();

        let mut handles = Vec::with_capacity(filter.workers);
        for _ in 0..filter.workers {
            let session = Arc::clone(&session);
            let cancel = cancel.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        alive = session.service_batch(batch_size, wait) => {
                            if !alive {
                                break;
                            }
                        }
                    }
                }
            }));
        }
        handles
    }
}
