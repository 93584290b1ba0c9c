//! Serialised solve requests.
//!
//! A solve mutates shared procurement trees in place, so two solves against
//! the same data must never overlap. [`SolveQueue`] runs submitted jobs one at
//! a time on a single worker thread, in submission order. The backlog is
//! bounded: when it is full, the oldest job that has not started yet is
//! superseded, and the newest submission is always kept.

use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use loadout_config::SolverConfig;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Why a ticket did not produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A newer submission pushed this job out of the backlog before it started.
    #[error("solve request superseded by a newer one")]
    Superseded,

    /// The queue was closed before the job was submitted.
    #[error("solve queue is closed")]
    Closed,

    /// The job panicked while running.
    #[error("solve job panicked")]
    Panicked,

    /// The worker went away without answering.
    #[error("solve worker stopped without a result")]
    WorkerLost,
}

type Job<T> = Box<dyn FnOnce() -> T + Send + 'static>;

struct Pending<T> {
    id: u64,
    job: Job<T>,
    reply: oneshot::Sender<Result<T, QueueError>>,
}

struct State<T> {
    pending: VecDeque<Pending<T>>,
    next_id: u64,
    closed: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    ready: Condvar,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to one submitted job.
///
/// # Example
///
/// ```
/// use loadout_solver::SolveQueue;
///
/// let queue = SolveQueue::new(4);
/// let ticket = queue.submit(|| 2 + 2).unwrap();
/// assert_eq!(ticket.wait(), Ok(4));
/// queue.close();
/// ```
pub struct SolveTicket<T> {
    id: u64,
    reply: oneshot::Receiver<Result<T, QueueError>>,
}

impl<T> SolveTicket<T> {
    /// Submission sequence number.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Blocks until the job finished or was dropped.
    ///
    /// Must not be called from inside an async runtime; await
    /// [`SolveTicket::into_receiver`] there instead.
    pub fn wait(self) -> Result<T, QueueError> {
        self.reply
            .blocking_recv()
            .unwrap_or(Err(QueueError::WorkerLost))
    }

    /// Returns the result if it is already available.
    pub fn try_result(&mut self) -> Option<Result<T, QueueError>> {
        match self.reply.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(QueueError::WorkerLost)),
        }
    }

    /// The underlying channel, for awaiting from async code.
    pub fn into_receiver(self) -> oneshot::Receiver<Result<T, QueueError>> {
        self.reply
    }
}

impl<T> Debug for SolveTicket<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveTicket").field("id", &self.id).finish()
    }
}

/// Single-worker FIFO queue of solve jobs.
pub struct SolveQueue<T: Send + 'static> {
    shared: Arc<Shared<T>>,
    backlog: usize,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> SolveQueue<T> {
    /// Starts the worker. `backlog` is clamped to at least one.
    pub fn new(backlog: usize) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                pending: VecDeque::new(),
                next_id: 0,
                closed: false,
            }),
            ready: Condvar::new(),
        });
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("loadout-solve".to_string())
            .spawn(move || work(&worker_shared));
        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "could not start solve worker");
                shared.lock().closed = true;
                None
            }
        };
        Self {
            shared,
            backlog: backlog.max(1),
            worker: Mutex::new(worker),
        }
    }

    /// Starts a queue sized by `[queue] backlog`.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.queue.backlog)
    }

    pub fn backlog(&self) -> usize {
        self.backlog
    }

    /// Jobs waiting to start.
    pub fn pending_len(&self) -> usize {
        self.shared.lock().pending.len()
    }

    /// Queues a job behind everything already submitted.
    pub fn submit<F>(&self, job: F) -> Result<SolveTicket<T>, QueueError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let mut state = self.shared.lock();
        if state.closed {
            return Err(QueueError::Closed);
        }
        while state.pending.len() >= self.backlog {
            if let Some(dropped) = state.pending.pop_front() {
                debug!(event = "superseded", job = dropped.id);
                let _ = dropped.reply.send(Err(QueueError::Superseded));
            }
        }
        let id = state.next_id;
        state.next_id += 1;
        state.pending.push_back(Pending {
            id,
            job: Box::new(job),
            reply: tx,
        });
        drop(state);
        self.shared.ready.notify_one();
        Ok(SolveTicket { id, reply: rx })
    }

    /// Refuses further submissions, lets queued jobs finish and joins the worker.
    pub fn close(&self) {
        self.shared.lock().closed = true;
        self.shared.ready.notify_all();
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("solve worker panicked");
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }
}

impl<T: Send + 'static> Drop for SolveQueue<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: Send + 'static> Debug for SolveQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveQueue")
            .field("backlog", &self.backlog)
            .field("pending", &self.pending_len())
            .finish()
    }
}

fn work<T>(shared: &Shared<T>) {
    loop {
        let next = {
            let mut state = shared.lock();
            loop {
                if let Some(next) = state.pending.pop_front() {
                    break Some(next);
                }
                if state.closed {
                    break None;
                }
                state = shared
                    .ready
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };
        let Some(Pending { id, job, reply }) = next else {
            return;
        };

        debug!(event = "job_start", job = id);
        let result = panic::catch_unwind(AssertUnwindSafe(job)).map_err(|_| QueueError::Panicked);
        if result.is_err() {
            warn!(event = "job_panicked", job = id);
        }
        let _ = reply.send(result);
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
