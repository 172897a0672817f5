//! Chain event subscription collaborator interface.

use tokio::sync::broadcast;

use wisp_chain_types::{Header, Log};

/// Chain-side event feeds, published by the header chain as it follows the
/// network. Receivers are independent broadcast subscriptions.
pub trait ChainEvents: Send + Sync {
    /// New canonical chain heads.
    fn subscribe_heads(&self) -> broadcast::Receiver<Header>;

    /// Logs confirmed by newly accepted blocks.
    fn subscribe_logs(&self) -> broadcast::Receiver<Vec<Log>>;

    /// Logs removed by chain reorganizations.
    fn subscribe_removed_logs(&self) -> broadcast::Receiver<Vec<Log>>;
}
