//! Runtime abstraction layer for async operations
//!
//! Report fetches are spawned through [`AsyncSpawner`] so the coordinator
//! never depends on a particular executor. With `tokio-runtime` enabled and
//! a tokio runtime active, tasks go to tokio; otherwise they run inline on a
//! `futures` executor.

use crate::prelude::{Arc, Future, Pin};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(&self, future: BoxFuture) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Runs each future to completion on the calling thread.
///
/// Futures that need a reactor (network I/O through reqwest) must not be
/// given to this spawner.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineSpawner;

struct CompletedHandle;

impl AsyncHandle for CompletedHandle {
    fn is_finished(&self) -> bool {
        true
    }

    fn cancel(&self) {}
}

impl AsyncSpawner for InlineSpawner {
    fn spawn_boxed(&self, future: BoxFuture) -> Box<dyn AsyncHandle> {
        futures::executor::block_on(future);
        Box::new(CompletedHandle)
    }
}

/// Holds futures until [`DeferredSpawner::run_pending`] is called, which
/// makes completion order controllable in tests and headless tools.
#[derive(Default, Clone)]
pub struct DeferredSpawner {
    pending: Arc<std::sync::Mutex<Vec<(BoxFuture, Arc<AtomicBool>)>>>,
}

// Set once the task has run or been cancelled
struct DeferredHandle {
    done: Arc<AtomicBool>,
}

impl AsyncHandle for DeferredHandle {
    fn is_finished(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.done.store(true, Ordering::SeqCst);
    }
}

impl DeferredSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Runs queued futures in the given order (indices into the queue as it
    /// stands). Cancelled tasks are dropped without running.
    pub fn run_in_order(&self, order: &[usize]) {
        let mut tasks: Vec<Option<(BoxFuture, Arc<AtomicBool>)>> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).map(Some).collect(),
            Err(_) => return,
        };
        for &i in order {
            if let Some((future, done)) = tasks.get_mut(i).and_then(Option::take) {
                if !done.load(Ordering::SeqCst) {
                    futures::executor::block_on(future);
                    done.store(true, Ordering::SeqCst);
                }
            }
        }
        // anything not named goes back in the queue
        if let Ok(mut pending) = self.pending.lock() {
            pending.extend(tasks.into_iter().flatten());
        }
    }

    pub fn run_pending(&self) {
        let n = self.pending();
        self.run_in_order(&(0..n).collect::<Vec<_>>());
    }
}

impl AsyncSpawner for DeferredSpawner {
    fn spawn_boxed(&self, future: BoxFuture) -> Box<dyn AsyncHandle> {
        let done = Arc::new(AtomicBool::new(false));
        if let Ok(mut pending) = self.pending.lock() {
            pending.push((future, done.clone()));
        }
        Box::new(DeferredHandle { done })
    }
}

#[cfg(feature = "tokio-runtime")]
pub mod tokio_impl {
    use super::*;
    use ::tokio::runtime::Handle;
    use ::tokio::task::JoinHandle;

    /// Tokio-based async spawner
    #[derive(Debug, Clone)]
    pub struct TokioSpawner {
        handle: Handle,
    }

    impl TokioSpawner {
        pub fn new(handle: Handle) -> Self {
            Self { handle }
        }

        /// Spawner for the runtime the caller is running on, if any
        pub fn current() -> Option<Self> {
            Handle::try_current().ok().map(Self::new)
        }
    }

    impl AsyncSpawner for TokioSpawner {
        fn spawn_boxed(&self, future: BoxFuture) -> Box<dyn AsyncHandle> {
            Box::new(TokioHandle(self.handle.spawn(future)))
        }
    }

    struct TokioHandle(JoinHandle<()>);

    impl AsyncHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

#[cfg(feature = "tokio-runtime")]
pub use tokio_impl::TokioSpawner;

/// Global runtime override
static RUNTIME: OnceLock<Arc<dyn AsyncSpawner>> = OnceLock::new();

/// Installs a process-wide spawner. Returns false if one was already set.
pub fn init_runtime(spawner: Arc<dyn AsyncSpawner>) -> bool {
    RUNTIME.set(spawner).is_ok()
}

/// The installed spawner, or the best one available on this thread
pub fn runtime() -> Arc<dyn AsyncSpawner> {
    if let Some(spawner) = RUNTIME.get() {
        return spawner.clone();
    }

    #[cfg(feature = "tokio-runtime")]
    if let Some(spawner) = TokioSpawner::current() {
        return Arc::new(spawner);
    }

    log::debug!("no async runtime active, spawning inline");
    Arc::new(InlineSpawner)
}

/// Convenience wrapper around `runtime().spawn_boxed`
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}
