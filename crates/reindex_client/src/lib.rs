//! Reindex client: transport to the job controller, status polling and the
//! command/event bridge used by front ends.
mod client;
mod controller;
mod poller;
mod search;
mod transport;
mod types;

pub use client::ClientHandle;
pub use controller::{
    execute, ControllerSettings, HttpJobController, JobController, ABORT_METHOD, CLEAN_METHOD,
    START_METHOD, STATUS_METHOD,
};
pub use poller::{ChannelEventSink, EventSink, PollSettings, Poller, PollerHandle};
pub use search::{fetch_page, HttpSearchPager, SearchPager};
pub use transport::HttpSettings;
pub use types::{ClientEvent, ControllerVariant, PollExit, TransportError, TransportErrorKind};
