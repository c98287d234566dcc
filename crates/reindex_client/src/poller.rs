//! Periodic status reads.
//!
//! The poller exists only so progress keeps moving without user input. It
//! ends itself after delivering a terminal snapshot (unless configured to keep
//! going) and is restarted on demand by the client.

use std::sync::{mpsc, Arc};
use std::time::Duration;

use reindex_core::SnapshotSource;
use reindex_logging::{reindex_debug, reindex_info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{ClientEvent, JobController, PollExit};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    /// Stop once a snapshot with `running == false` has been delivered.
    pub stop_when_idle: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            stop_when_idle: true,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<PollExit>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the poll loop to end. A panicked loop counts as cancelled.
    pub async fn join(self) -> PollExit {
        self.task.await.unwrap_or(PollExit::Cancelled)
    }
}

pub struct Poller;

impl Poller {
    /// Spawns the poll loop on `runtime`. The first read happens one
    /// interval from now.
    pub fn spawn(
        runtime: &Handle,
        controller: Arc<dyn JobController>,
        settings: PollSettings,
        sink: Arc<dyn EventSink>,
    ) -> PollerHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        reindex_info!(
            "Status poller started (interval {:?}, stop_when_idle={})",
            settings.interval,
            settings.stop_when_idle
        );
        let task = runtime.spawn(async move {
            let exit = poll_loop(controller.as_ref(), &settings, sink.as_ref(), &token).await;
            reindex_info!("Status poller stopped: {:?}", exit);
            sink.emit(ClientEvent::PollerStopped { exit });
            exit
        });
        PollerHandle { cancel, task }
    }
}

async fn poll_loop(
    controller: &dyn JobController,
    settings: &PollSettings,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) -> PollExit {
    let mut ticker = interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return PollExit::Cancelled,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => return PollExit::Cancelled,
            result = controller.status() => result,
        };

        match result {
            Ok(snapshot) => {
                let terminal = snapshot.is_terminal();
                reindex_debug!(
                    "Poll: running={} code={} history={}",
                    snapshot.running,
                    snapshot.code,
                    snapshot.history().len()
                );
                sink.emit(ClientEvent::Snapshot {
                    source: SnapshotSource::Poll,
                    snapshot,
                });
                if terminal && settings.stop_when_idle {
                    return PollExit::Idle;
                }
            }
            Err(error) => sink.emit(ClientEvent::TransportFailed {
                source: SnapshotSource::Poll,
                error,
            }),
        }
    }
}
