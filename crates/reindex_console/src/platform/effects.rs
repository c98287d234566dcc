use std::collections::HashSet;
use std::time::Duration;

use reindex_client::{ClientEvent, ClientHandle, PollExit};
use reindex_core::{Effect, Msg, RequestId, SnapshotSource};
use reindex_logging::{reindex_debug, reindex_info, reindex_warn};

/// Runs core effects against the client and turns client events back into
/// messages. Tracks what is still outstanding so the caller knows when to
/// stop waiting.
pub struct EffectRunner {
    client: ClientHandle,
    watch: bool,
    pending: HashSet<RequestId>,
    poller_active: bool,
    failed_commands: usize,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, watch: bool) -> Self {
        Self {
            client,
            watch,
            pending: HashSet::new(),
            poller_active: false,
            failed_commands: 0,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send {
                    request_id,
                    command,
                } => {
                    self.pending.insert(request_id);
                    self.client.issue(request_id, command);
                }
                Effect::EnsurePolling => {
                    if !self.watch {
                        reindex_debug!("Polling not requested, ignoring EnsurePolling");
                        continue;
                    }
                    self.poller_active = true;
                    self.client.ensure_polling();
                }
                Effect::FetchResults {
                    request_id,
                    direction,
                } => {
                    self.pending.insert(request_id);
                    self.client.fetch_results(request_id, direction);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next client event.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.client.recv_timeout(timeout)?;
        Some(self.map_event(event))
    }

    /// Nothing in flight and no poller left to wait for.
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty() && !self.poller_active
    }

    pub fn failed_commands(&self) -> usize {
        self.failed_commands
    }

    fn map_event(&mut self, event: ClientEvent) -> Msg {
        match event {
            ClientEvent::Snapshot { source, snapshot } => {
                self.settle(source);
                Msg::SnapshotReceived { source, snapshot }
            }
            ClientEvent::TransportFailed { source, error } => {
                match source {
                    SnapshotSource::Command { request_id, kind } => {
                        reindex_warn!(
                            "{} (request {}) failed: {}",
                            kind.as_str(),
                            request_id,
                            error
                        );
                        self.failed_commands += 1;
                    }
                    SnapshotSource::Poll => reindex_warn!("Status poll failed: {}", error),
                }
                self.settle(source);
                Msg::TransportFailed {
                    source,
                    error: error.to_string(),
                }
            }
            ClientEvent::Results { request_id, result } => {
                self.pending.remove(&request_id);
                match result {
                    Ok(page) => Msg::ResultsReceived { request_id, page },
                    Err(error) => {
                        reindex_warn!("Results request {} failed: {}", request_id, error);
                        self.failed_commands += 1;
                        Msg::NoOp
                    }
                }
            }
            ClientEvent::PollerStopped { exit } => {
                self.poller_active = false;
                match exit {
                    PollExit::Idle => reindex_info!("Rebuild is idle, polling stopped"),
                    PollExit::Cancelled => reindex_debug!("Poller cancelled"),
                }
                Msg::NoOp
            }
        }
    }

    fn settle(&mut self, source: SnapshotSource) {
        if let SnapshotSource::Command { request_id, .. } = source {
            self.pending.remove(&request_id);
        }
    }
}
