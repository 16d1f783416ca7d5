//! Execution contexts that outcomes are handed to.
//!
//! Whatever thread a transport finishes on, the caller's callback only ever
//! runs on the [`DeliveryContext`] the decoder was built with.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Unit of work handed to a delivery context
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Somewhere a completion can be scheduled
pub trait DeliveryContext: Send + Sync + 'static {
    /// Schedule `job` to run on this context
    ///
    /// Jobs that can no longer run (context shut down) are dropped.
    fn dispatch(&self, job: Job);
}

/// Dedicated thread running jobs one at a time in submission order
///
/// The thread exits once every clone of the queue is dropped and the
/// pending jobs have run.
#[derive(Clone)]
pub struct SerialQueue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    label: String,
    sender: mpsc::UnboundedSender<Job>,
    thread: ThreadId,
}

impl SerialQueue {
    /// Spawn the queue thread, named after `label`
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread
    pub fn new(label: impl Into<String>) -> std::io::Result<Self> {
        let label = label.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        let thread_label = label.clone();
        let handle = thread::Builder::new().name(label.clone()).spawn(move || {
            while let Some(job) = receiver.blocking_recv() {
                if catch_unwind(AssertUnwindSafe(job)).is_err() {
                    tracing::error!(queue = %thread_label, "delivery job panicked");
                }
            }

            tracing::debug!(queue = %thread_label, "delivery queue stopped");
        })?;

        Ok(Self {
            inner: Arc::new(QueueInner {
                label,
                sender,
                thread: handle.thread().id(),
            }),
        })
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Whether the calling thread is this queue's thread
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.inner.thread
    }
}

impl DeliveryContext for SerialQueue {
    fn dispatch(&self, job: Job) {
        if self.inner.sender.send(job).is_err() {
            tracing::warn!(queue = %self.inner.label, "delivery queue is gone, dropping job");
        }
    }
}

impl fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialQueue")
            .field("label", &self.inner.label)
            .finish_non_exhaustive()
    }
}

/// Delivers onto a specific Tokio runtime
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    handle: Handle,
}

impl RuntimeContext {
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Context for the runtime the caller is running on
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl DeliveryContext for RuntimeContext {
    fn dispatch(&self, job: Job) {
        self.handle.spawn(async move { job() });
    }
}
