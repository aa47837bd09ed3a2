use crossbeam::channel;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::dispatch::handler::RequestHandler;
use crate::dispatch::progress::{ProgressSnapshot, ProgressTracker};
use crate::dispatch::request::{QueueEntry, Request, ResultEntry};
use crate::dispatch::worker::WorkerPool;
use crate::error::{Error, Result};

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;

/// Everything the workers share: the handler, the progress counters and the
/// result collection.
pub(crate) struct BatchState<H, M>
where
    H: RequestHandler,
{
    handler: H,
    tracker: Arc<ProgressTracker>,
    results: Arc<Mutex<Vec<ResultEntry<H::Args, M, H::Output>>>>,
}

impl<H, M> BatchState<H, M>
where
    H: RequestHandler,
    M: Send + 'static,
{
    pub(crate) fn new(
        handler: H,
        tracker: Arc<ProgressTracker>,
        results: Arc<Mutex<Vec<ResultEntry<H::Args, M, H::Output>>>>,
    ) -> Self {
        Self {
            handler,
            tracker,
            results,
        }
    }

    /// Process a single dequeued request.
    ///
    /// A handler failure is logged and replaced with `Output::default()`;
    /// it never aborts the rest of the batch.
    pub(crate) fn process_request(&self, entry: QueueEntry<H::Args, M>) {
        self.tracker.start_request();

        tracing::trace!(
            "Processing request {}, queued {}ms ago",
            entry.id,
            entry.queue_time.elapsed().as_millis()
        );

        let output = match self.handler.handle(entry.request.args.clone()) {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Request {} failed: {e}", entry.id);
                H::Output::default()
            }
        };

        self.tracker.complete_request();

        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ResultEntry {
                input: entry.request,
                output,
            });

        self.tracker.log_progress();
    }
}

/// Runs one batch of requests through a handler on a bounded pool of worker
/// threads.
///
/// Lifecycle: [`Dispatcher::new`] → [`Dispatcher::register_batch`] →
/// [`Dispatcher::process_all_requests`] → [`Dispatcher::get_results`]. A
/// dispatcher accepts exactly one batch.
pub struct Dispatcher<H, M>
where
    H: RequestHandler,
{
    max_concurrent_requests: usize,
    queue: VecDeque<QueueEntry<H::Args, M>>,
    state: Option<Arc<BatchState<H, M>>>,
    tracker: Arc<ProgressTracker>,
    results: Arc<Mutex<Vec<ResultEntry<H::Args, M, H::Output>>>>,
}

impl<H, M> Dispatcher<H, M>
where
    H: RequestHandler,
    M: Send + 'static,
{
    /// Create a dispatcher limited to `max_concurrent_requests` concurrent
    /// handler invocations. A limit of zero is a configuration error.
    pub fn new(max_concurrent_requests: usize) -> Result<Self> {
        if max_concurrent_requests == 0 {
            return Err(Error::InvalidConcurrencyLimit(max_concurrent_requests));
        }
        Ok(Self {
            max_concurrent_requests,
            queue: VecDeque::new(),
            state: None,
            tracker: Arc::new(ProgressTracker::new()),
            results: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Register the handler and the full list of requests.
    ///
    /// Requests are enqueued in input order. An empty list is valid and
    /// means zero work. Registering twice is rejected.
    pub fn register_batch(&mut self, handler: H, requests: Vec<Request<H::Args, M>>) -> Result<()> {
        if self.state.is_some() {
            return Err(Error::BatchAlreadyRegistered);
        }

        self.tracker.set_total(requests.len());
        self.queue = requests.into_iter().map(QueueEntry::new).collect();
        self.state = Some(Arc::new(BatchState::new(
            handler,
            self.tracker.clone(),
            self.results.clone(),
        )));

        tracing::debug!("Registered batch of {} requests", self.queue.len());
        Ok(())
    }

    /// Run every registered request to completion, blocking the caller.
    ///
    /// Spawns at most `max_concurrent_requests` workers, feeds them the
    /// queued requests in submission order and joins the pool. Joining is
    /// the completion barrier: once this returns, every request has been
    /// processed and its result recorded.
    pub fn process_all_requests(&mut self) -> Result<()> {
        let state = self.state.clone().ok_or(Error::NoBatchRegistered)?;

        if self.queue.is_empty() {
            return Ok(());
        }

        let num_workers = self.max_concurrent_requests.min(self.queue.len());
        let (tx, rx) = channel::unbounded();
        let pool = WorkerPool::new(num_workers, rx, state)?;

        for entry in self.queue.drain(..) {
            // Send fails only if every worker already exited, i.e. panicked
            tx.send(entry).map_err(|_| Error::WorkerPanicked)?;
        }
        drop(tx);

        pool.join()
    }

    /// Current progress. Safe to call at any time, but only a best-effort
    /// view while workers are running.
    pub fn progress(&self) -> ProgressSnapshot {
        self.tracker.snapshot()
    }

    /// The accumulated input/output pairs, in completion order.
    ///
    /// Complete and stable once [`Dispatcher::process_all_requests`] has
    /// returned; a partial snapshot if called while workers are running.
    pub fn get_results(&self) -> Vec<ResultEntry<H::Args, M, H::Output>>
    where
        H::Args: Clone,
        M: Clone,
        H::Output: Clone,
    {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<H, M> Default for Dispatcher<H, M>
where
    H: RequestHandler,
    M: Send + 'static,
{
    fn default() -> Self {
        Self {
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            queue: VecDeque::new(),
            state: None,
            tracker: Arc::new(ProgressTracker::new()),
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }
}
