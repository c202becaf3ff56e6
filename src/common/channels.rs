//! Channel type definitions for inter-task communication

use tokio::sync::mpsc;

use super::errors::ClientError;

/// Default channel buffer size for refresh failures
pub const DEFAULT_CHANNEL_SIZE: usize = 16;

/// A failed snapshot update, tagged with the snapshot it was updating
pub type RefreshFailure = (&'static str, ClientError);

/// Create a channel collecting failures from concurrent refresh tasks
pub fn create_failure_channel() -> (mpsc::Sender<RefreshFailure>, mpsc::Receiver<RefreshFailure>) {
    mpsc::channel(DEFAULT_CHANNEL_SIZE)
}
