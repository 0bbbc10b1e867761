//! Storage abstraction for persistence.
//!
//! The backend that holds saved topologies is a collaborator behind the
//! [`Storage`] trait. [`TopologySession`] drives it on behalf of the editor.

mod file;
mod memory;
mod session;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use session::{Notice, NoticeLevel, TopologySession};

use crate::document::TopologyDocument;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Topology not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future returned by storage backends.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A place topologies are saved to and loaded from, keyed by topology id.
///
/// Implementations can be in memory, on the filesystem, or a remote API.
pub trait Storage: Send + Sync {
    /// Save a topology, replacing any previous version.
    fn save(&self, id: &str, document: &TopologyDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a topology.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<TopologyDocument>>;

    /// Delete a topology. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all topology ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a topology exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Minimal executor for driving storage futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
