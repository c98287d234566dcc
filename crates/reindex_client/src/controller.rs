use reindex_core::{Command, JobSnapshot, StartRequest};
use reindex_logging::reindex_debug;

use crate::transport::{build_client, endpoint, post_json, HttpSettings};
use crate::{ControllerVariant, TransportError};

pub const START_METHOD: &str = "rebuildDatabase";
pub const ABORT_METHOD: &str = "abort";
pub const CLEAN_METHOD: &str = "clean";
pub const STATUS_METHOD: &str = "getStatus";

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Base URL of the controller; method names are appended as path segments.
    pub base_url: String,
    pub variant: ControllerVariant,
    pub http: HttpSettings,
}

impl ControllerSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            variant: ControllerVariant::default(),
            http: HttpSettings::default(),
        }
    }
}

/// The remote job controller. Every call yields exactly one snapshot or a
/// transport failure.
#[async_trait::async_trait]
pub trait JobController: Send + Sync {
    async fn start(&self, request: &StartRequest) -> Result<JobSnapshot, TransportError>;
    async fn abort(&self) -> Result<JobSnapshot, TransportError>;
    async fn clean(&self) -> Result<JobSnapshot, TransportError>;
    async fn status(&self) -> Result<JobSnapshot, TransportError>;
}

pub async fn execute(
    controller: &dyn JobController,
    command: &Command,
) -> Result<JobSnapshot, TransportError> {
    match command {
        Command::Start(request) => controller.start(request).await,
        Command::Abort => controller.abort().await,
        Command::Clean => controller.clean().await,
        Command::Status => controller.status().await,
    }
}

#[derive(Debug, Clone)]
pub struct HttpJobController {
    settings: ControllerSettings,
    client: reqwest::Client,
}

impl HttpJobController {
    pub fn new(settings: ControllerSettings) -> Result<Self, TransportError> {
        let client = build_client(&settings.http)?;
        Ok(Self { settings, client })
    }

    async fn call(
        &self,
        method: &str,
        body: Option<&StartRequest>,
    ) -> Result<JobSnapshot, TransportError> {
        let url = endpoint(&self.settings.base_url, method)?;
        post_json(&self.client, url, body).await
    }

    /// Strips the options a minimal controller would not understand.
    fn shape_request(&self, request: &StartRequest) -> StartRequest {
        match self.settings.variant {
            ControllerVariant::Extended => request.clone(),
            ControllerVariant::Minimal => {
                if request.job.is_some() || request.overwrite.is_some() {
                    reindex_debug!(
                        "Minimal controller: dropping job={:?} overwrite={:?}",
                        request.job,
                        request.overwrite
                    );
                }
                StartRequest::new(request.workers)
            }
        }
    }
}

#[async_trait::async_trait]
impl JobController for HttpJobController {
    async fn start(&self, request: &StartRequest) -> Result<JobSnapshot, TransportError> {
        let request = self.shape_request(request);
        self.call(START_METHOD, Some(&request)).await
    }

    async fn abort(&self) -> Result<JobSnapshot, TransportError> {
        self.call(ABORT_METHOD, None).await
    }

    async fn clean(&self) -> Result<JobSnapshot, TransportError> {
        self.call(CLEAN_METHOD, None).await
    }

    async fn status(&self) -> Result<JobSnapshot, TransportError> {
        self.call(STATUS_METHOD, None).await
    }
}
