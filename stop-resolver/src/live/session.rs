//! The fetch → resolve → publish → sleep loop.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, warn};

use crate::transit::FetchError;

/// Latest published value of a session, `None` until the first success.
pub type Snapshot<U> = Option<Arc<U>>;

/// Shared "is this session still wanted" flag.
///
/// Toggled from the consumer's teardown path, read by the loop after every
/// suspension point.
#[derive(Default)]
struct Cancellation {
    cancelled: AtomicBool,
    wake: Notify,
}

impl Cancellation {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Stores a permit if the loop is not parked yet
        self.wake.notify_one();
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A background refresh loop bound to one consumer.
///
/// The loop fetches, derives a value with `resolve`, publishes it, then
/// sleeps for `interval` measured from the end of the cycle. Failed fetches
/// are reported through `on_error` and retried on the same cadence; nothing
/// short of cancellation stops the loop.
///
/// Once [`cancel`](Self::cancel) returns, no callback fires again and no new
/// fetch starts. A fetch already in flight runs to completion and its result
/// is discarded. Dropping the session cancels it.
pub struct PollingSession<U> {
    cancellation: Arc<Cancellation>,
    latest: watch::Receiver<Snapshot<U>>,
    task: Option<JoinHandle<()>>,
}

impl<U: Send + Sync + 'static> PollingSession<U> {
    /// Spawn a session on the current tokio runtime.
    ///
    /// The first fetch starts immediately. The task inherits the caller's
    /// tracing span.
    pub fn start<T, F, Fut, R, OnUpdate, OnError>(
        mut fetch: F,
        mut resolve: R,
        interval: Duration,
        mut on_update: OnUpdate,
        mut on_error: OnError,
    ) -> Self
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
        R: FnMut(T) -> U + Send + 'static,
        OnUpdate: FnMut(Arc<U>) + Send + 'static,
        OnError: FnMut(&FetchError) + Send + 'static,
    {
        let cancellation = Arc::new(Cancellation::default());
        let (publisher, latest) = watch::channel(None);

        let flag = Arc::clone(&cancellation);
        let task = tokio::spawn(
            async move {
                info!(?interval, "polling session started");
                let mut cycle: u64 = 0;

                while !flag.is_cancelled() {
                    cycle += 1;
                    let outcome = fetch().await;

                    if flag.is_cancelled() {
                        debug!(cycle, "discarding fetch that finished after cancellation");
                        break;
                    }

                    match outcome {
                        Ok(raw) => {
                            let derived = Arc::new(resolve(raw));
                            if flag.is_cancelled() {
                                break;
                            }
                            publisher.send_replace(Some(Arc::clone(&derived)));
                            on_update(derived);
                        }
                        Err(e) => {
                            warn!(cycle, error = %e, "refresh failed, retrying next cycle");
                            on_error(&e);
                        }
                    }

                    tokio::select! {
                        _ = tokio::time::sleep(interval) => {}
                        _ = flag.wake.notified() => {}
                    }
                }

                info!(cycles = cycle, "polling session stopped");
            }
            .in_current_span(),
        );

        Self {
            cancellation,
            latest,
            task: Some(task),
        }
    }
}

impl<U> PollingSession<U> {
    /// Stop the session. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Whether the loop is still running and has not been cancelled.
    pub fn is_active(&self) -> bool {
        !self.cancellation.is_cancelled()
            && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// The most recently published value.
    pub fn latest(&self) -> Snapshot<U> {
        self.latest.borrow().clone()
    }

    /// A receiver that is notified on every publish.
    ///
    /// Slow readers only ever see the newest value; intermediate ones are
    /// overwritten.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<U>> {
        self.latest.clone()
    }

    /// Cancel and wait for the loop, including any in-flight fetch, to end.
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "polling task ended abnormally");
        }
    }
}

impl<U> Drop for PollingSession<U> {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
