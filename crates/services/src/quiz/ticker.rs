use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::trace;

use quiz_core::quiz::SessionGeneration;

/// Default spacing between countdown ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// One countdown pulse, addressed to the session it was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: SessionGeneration,
}

/// Spawns the countdown task for one timed session.
pub struct SessionTicker;

impl SessionTicker {
    /// Emit a [`Tick`] for `generation` every `period`, starting one period
    /// from now, until the returned handle is dropped or the receiver closes.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(
        generation: SessionGeneration,
        period: Duration,
        sink: mpsc::UnboundedSender<Tick>,
    ) -> TickerHandle {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                trace!(%generation, "tick");
                if sink.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });
        TickerHandle { generation, task }
    }
}

/// Owning handle for a running ticker. Dropping it aborts the task.
#[derive(Debug)]
pub struct TickerHandle {
    generation: SessionGeneration,
    task: JoinHandle<()>,
}

impl TickerHandle {
    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Receiving side of the tick channel, shareable with a UI event pump.
#[derive(Clone)]
pub struct TickStream {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Tick>>>,
}

impl TickStream {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Tick>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Wait for the next tick. `None` once every sender is gone.
    pub async fn next(&self) -> Option<Tick> {
        self.rx.lock().await.recv().await
    }

    /// Take a queued tick without waiting.
    #[must_use]
    pub fn try_next(&self) -> Option<Tick> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_carry_their_generation() {
        let (tx, rx) = mpsc::unbounded_channel();
        let stream = TickStream::new(rx);
        let _handle = SessionTicker::spawn(SessionGeneration::new(4), DEFAULT_TICK_PERIOD, tx);

        let started = Instant::now();
        for _ in 0..3 {
            let tick = stream.next().await.unwrap();
            assert_eq!(tick.generation, SessionGeneration::new(4));
        }
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_ticks() {
        let (tx, rx) = mpsc::unbounded_channel();
        let stream = TickStream::new(rx);
        let handle = SessionTicker::spawn(SessionGeneration::new(1), DEFAULT_TICK_PERIOD, tx);

        assert!(stream.next().await.is_some());
        drop(handle);

        // The aborted task drops its sender, which closes the channel.
        assert!(stream.next().await.is_none());
    }
}
