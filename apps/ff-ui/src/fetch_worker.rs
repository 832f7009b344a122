//! Bridge between the egui frame loop and async service calls.
//!
//! One worker per in-flight request: a plain thread builds a current-thread
//! tokio runtime, blocks on the service future, and sends the result over a
//! std channel. The UI polls `try_take` each frame. Dropping the worker drops
//! the receiver, so a late result from a superseded request has nowhere to
//! land and is silently discarded.

use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread::{self, JoinHandle};

use ff_app::{AppError, AppResult, RequestSlot, RequestState, Ticket};

pub struct FetchWorker<T> {
    rx: Receiver<AppResult<T>>,
    _handle: JoinHandle<()>,
}

impl<T: Send + 'static> FetchWorker<T> {
    /// Spawn a worker for one request. The closure runs on the worker thread
    /// and produces the future there, so captured `Arc<ApiClient>` handles
    /// move with it.
    pub fn spawn<F, Fut>(task: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>>,
    {
        let (tx, rx) = channel();
        let handle = thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(task()),
                Err(e) => Err(AppError::Internal(format!("worker runtime: {e}"))),
            };
            // The app may have dropped the receiver; nothing to do then.
            let _ = tx.send(result);
        });
        Self {
            rx,
            _handle: handle,
        }
    }

    /// Non-blocking poll. `Some` exactly once, when the request settles.
    pub fn try_take(&self) -> Option<AppResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AppError::Internal(
                "worker exited without a result".to_string(),
            ))),
        }
    }
}

/// A request slot paired with its in-flight worker, the unit every view
/// holds per fetchable piece of data.
pub struct Fetch<T> {
    slot: RequestSlot<T>,
    worker: Option<(Ticket, FetchWorker<T>)>,
}

impl<T: Send + 'static> Default for Fetch<T> {
    fn default() -> Self {
        Self {
            slot: RequestSlot::default(),
            worker: None,
        }
    }
}

impl<T: Send + 'static> Fetch<T> {
    /// Begin a new attempt; an in-flight worker is dropped and its eventual
    /// result discarded by the slot's ticket check.
    pub fn start<F, Fut>(&mut self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>>,
    {
        let ticket = self.slot.begin();
        self.worker = Some((ticket, FetchWorker::spawn(task)));
    }

    /// Poll once per frame; settles the slot when the worker finishes.
    pub fn poll(&mut self) {
        if let Some((ticket, worker)) = &self.worker {
            if let Some(result) = worker.try_take() {
                let ticket = *ticket;
                self.worker = None;
                self.slot.resolve(ticket, result);
            }
        }
    }

    pub fn in_flight(&self) -> bool {
        self.worker.is_some()
    }

    pub fn state(&self) -> &RequestState<T> {
        self.slot.state()
    }

    pub fn reset(&mut self) {
        self.worker = None;
        self.slot.reset();
    }
}
