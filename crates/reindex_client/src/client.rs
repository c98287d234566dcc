use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use reindex_core::{Command, PageDirection, RequestId, SnapshotSource};
use reindex_logging::{reindex_debug, reindex_info, reindex_warn};

use crate::controller::execute;
use crate::poller::{ChannelEventSink, EventSink, PollSettings, Poller, PollerHandle};
use crate::search::fetch_page;
use crate::{ClientEvent, JobController, SearchPager, TransportError, TransportErrorKind};

enum ClientCommand {
    Issue {
        request_id: RequestId,
        command: Command,
    },
    EnsurePolling,
    FetchResults {
        request_id: RequestId,
        direction: PageDirection,
    },
    Shutdown,
}

/// Bridge between a synchronous UI loop and the async controller client.
///
/// Commands are queued to a dedicated thread that owns a tokio runtime; every
/// RPC runs as its own task so a slow reply never holds up later commands.
/// Results come back as [`ClientEvent`]s in arrival order.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(
        controller: Arc<dyn JobController>,
        pager: Option<Arc<dyn SearchPager>>,
        poll: PollSettings,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

        thread::Builder::new()
            .name("reindex-client".to_string())
            .spawn(move || {
                let mut poller: Option<PollerHandle> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        ClientCommand::Issue {
                            request_id,
                            command,
                        } => {
                            let controller = controller.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                issue(controller.as_ref(), request_id, command, sink.as_ref())
                                    .await;
                            });
                        }
                        ClientCommand::EnsurePolling => {
                            if poller.as_ref().is_some_and(|live| !live.is_finished()) {
                                continue;
                            }
                            poller = Some(Poller::spawn(
                                runtime.handle(),
                                controller.clone(),
                                poll.clone(),
                                sink.clone(),
                            ));
                        }
                        ClientCommand::FetchResults {
                            request_id,
                            direction,
                        } => {
                            let pager = pager.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                let result = match pager {
                                    Some(pager) => fetch_page(pager.as_ref(), direction).await,
                                    None => Err(TransportError::new(
                                        TransportErrorKind::InvalidUrl,
                                        "no search service configured",
                                    )),
                                };
                                sink.emit(ClientEvent::Results { request_id, result });
                            });
                        }
                        ClientCommand::Shutdown => break,
                    }
                }
                if let Some(poller) = poller.take() {
                    poller.cancel();
                }
                runtime.shutdown_timeout(Duration::from_secs(1));
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn issue(&self, request_id: RequestId, command: Command) {
        reindex_info!("Issuing {} (request {})", command.kind().as_str(), request_id);
        let _ = self.cmd_tx.send(ClientCommand::Issue {
            request_id,
            command,
        });
    }

    pub fn ensure_polling(&self) {
        let _ = self.cmd_tx.send(ClientCommand::EnsurePolling);
    }

    pub fn fetch_results(&self, request_id: RequestId, direction: PageDirection) {
        let _ = self.cmd_tx.send(ClientCommand::FetchResults {
            request_id,
            direction,
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Cancels the poller and stops the runtime thread. In-flight requests
    /// get a short grace period.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(ClientCommand::Shutdown);
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn issue(
    controller: &dyn JobController,
    request_id: RequestId,
    command: Command,
    sink: &dyn EventSink,
) {
    let source = SnapshotSource::Command {
        request_id,
        kind: command.kind(),
    };
    match execute(controller, &command).await {
        Ok(snapshot) => {
            reindex_debug!(
                "Request {} answered: code={} running={}",
                request_id,
                snapshot.code,
                snapshot.running
            );
            sink.emit(ClientEvent::Snapshot { source, snapshot });
        }
        Err(error) => {
            reindex_warn!(
                "Request {} ({}) failed: {}",
                request_id,
                command.kind().as_str(),
                error
            );
            sink.emit(ClientEvent::TransportFailed { source, error });
        }
    }
}
