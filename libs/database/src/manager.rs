//! Lazily-initialized, single-flight store connection

use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::common::ConnectionError;

/// Opens (and closes) authenticated store handles.
///
/// The manager owns exactly one handle produced by `connect`; `Handle`
/// clones are shared by every in-flight request.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Clone + Send + Sync + 'static;

    /// Connect and authenticate.
    async fn connect(&self) -> Result<Self::Handle, ConnectionError>;

    /// Tear down a handle previously returned by `connect`.
    async fn close(&self, _handle: Self::Handle) {}
}

/// Lifecycle of the managed connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Uninitialized = 0,
    Connecting = 1,
    Ready = 2,
    Failed = 3,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Ready,
            3 => ConnectionState::Failed,
            _ => ConnectionState::Uninitialized,
        }
    }
}

/// Upper bound on one `acquire`, waiting for the slot included.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns at most one live store handle.
///
/// The handle is created on the first [`acquire`](Self::acquire) and reused
/// afterwards. Initialization happens while the slot lock is held, so
/// concurrent first callers wait for the same attempt instead of racing to
/// open their own connections. A failed attempt leaves the slot empty and the
/// next `acquire` retries.
///
/// Every `acquire` is bounded by the acquire timeout so a dead store surfaces
/// as [`ConnectionError::Unreachable`] well inside a request's deadline.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    slot: Mutex<Option<C::Handle>>,
    state: AtomicU8,
    acquire_timeout: Duration,
}

/// Puts the state back to `Uninitialized` if a connect attempt is dropped
/// before it finishes.
struct ConnectingGuard<'a> {
    state: &'a AtomicU8,
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        let _ = self.state.compare_exchange(
            ConnectionState::Connecting as u8,
            ConnectionState::Uninitialized as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            slot: Mutex::new(None),
            state: AtomicU8::new(ConnectionState::Uninitialized as u8),
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Return the live handle, connecting first if there is none.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<C::Handle, ConnectionError> {
        match tokio::time::timeout(self.acquire_timeout, self.acquire_inner()).await {
            Ok(result) => result,
            Err(_) => {
                self.set_state(ConnectionState::Failed);
                error!(timeout = ?self.acquire_timeout, "Store connection timed out");
                Err(ConnectionError::Unreachable(format!(
                    "no store connection within {:?}",
                    self.acquire_timeout
                )))
            }
        }
    }

    async fn acquire_inner(&self) -> Result<C::Handle, ConnectionError> {
        let mut slot = self.slot.lock().await;

        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        self.set_state(ConnectionState::Connecting);
        let _guard = ConnectingGuard { state: &self.state };

        match self.connector.connect().await {
            Ok(handle) => {
                *slot = Some(handle.clone());
                self.set_state(ConnectionState::Ready);
                info!("Store connection established");
                Ok(handle)
            }
            Err(e) => {
                self.set_state(ConnectionState::Failed);
                error!(error = %e, "Store connection failed");
                Err(e)
            }
        }
    }

    /// Close the live handle, if any. A later `acquire` reconnects.
    #[instrument(skip(self))]
    pub async fn release(&self) {
        let handle = self.slot.lock().await.take();

        if let Some(handle) = handle {
            self.connector.close(handle).await;
            info!("Store connection closed");
        }

        self.set_state(ConnectionState::Uninitialized);
    }
}
