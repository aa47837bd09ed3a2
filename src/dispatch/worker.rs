use crossbeam::channel::Receiver;
use std::sync::Arc;
use std::thread::JoinHandle;
use uuid::Uuid;

use crate::dispatch::dispatcher::BatchState;
use crate::dispatch::handler::RequestHandler;
use crate::dispatch::request::QueueEntry;
use crate::error::{Error, Result};

#[derive(Debug)]
pub(crate) struct Worker<H, M>
where
    H: RequestHandler,
{
    pub receiver: Receiver<QueueEntry<H::Args, M>>,
    join_handle: JoinHandle<()>,
}

impl<H, M> Worker<H, M>
where
    H: RequestHandler,
    M: Send + 'static,
{
    pub(crate) fn new(
        receiver: Receiver<QueueEntry<H::Args, M>>,
        state: Arc<BatchState<H, M>>,
    ) -> Result<Self> {
        let recv_clone = receiver.clone();
        let join_handle = std::thread::Builder::new()
            .name(format!("worker-{}", Uuid::new_v4()))
            .spawn(move || {
                while let Ok(entry) = recv_clone.recv() {
                    state.process_request(entry);
                }
                tracing::trace!("Worker shutting down");
            })?;
        Ok(Self {
            receiver,
            join_handle,
        })
    }

    pub(crate) fn join(self) -> Result<()> {
        drop(self.receiver);
        self.join_handle.join().map_err(|_| Error::WorkerPanicked)?;
        Ok(())
    }
}

pub(crate) struct WorkerPool<H, M>
where
    H: RequestHandler,
{
    workers: Vec<Worker<H, M>>,
}

impl<H, M> std::fmt::Debug for WorkerPool<H, M>
where
    H: RequestHandler + std::fmt::Debug,
    H::Args: std::fmt::Debug,
    M: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}

impl<H, M> WorkerPool<H, M>
where
    H: RequestHandler,
    M: Send + 'static,
{
    pub(crate) fn new(
        num_workers: usize,
        receiver: Receiver<QueueEntry<H::Args, M>>,
        state: Arc<BatchState<H, M>>,
    ) -> Result<Self> {
        // Every worker pulls from a clone of the same receiver
        let workers = (0..num_workers)
            .map(|_| {
                let worker_receiver = receiver.clone();
                Worker::new(worker_receiver, state.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { workers })
    }

    pub(crate) fn join(self) -> Result<()> {
        for worker in self.workers {
            worker.join()?;
        }
        Ok(())
    }
}
