use std::time::Instant;
use uuid::Uuid;

/// One record of a batch: the positional arguments passed to the handler
/// plus a metadata value that is carried through to the result untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<A, M> {
    /// Handler arguments. Use a tuple for multiple positional arguments.
    pub args: A,

    /// Metadata, never passed to the handler.
    pub meta: M,
}

impl<A, M> Request<A, M> {
    pub fn new(args: A, meta: M) -> Self {
        Self { args, meta }
    }
}

/// One input/output pair produced by the dispatcher.
///
/// `output` is the handler's return value, or `O::default()` if the handler
/// failed for this record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry<A, M, O> {
    pub input: Request<A, M>,
    pub output: O,
}

/// Queue entry
#[derive(Debug)]
pub(crate) struct QueueEntry<A, M> {
    /// Identifier
    pub id: Uuid,

    /// Request
    pub request: Request<A, M>,

    /// Instant when this entry was queued
    pub queue_time: Instant,
}

impl<A, M> QueueEntry<A, M> {
    pub fn new(request: Request<A, M>) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            queue_time: Instant::now(),
        }
    }
}
