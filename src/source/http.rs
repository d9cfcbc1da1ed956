//! HTTP data source for Statuspage-style APIs.
//!
//! A background task fetches the five `api/v2` documents on a fixed interval
//! and hands each completed cycle to the UI as one whole snapshot.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{
    ComponentsPayload, DataSource, IncidentsPayload, MaintenancesPayload, SourceError,
    StatusPayload, StatusSnapshot,
};

/// Default status page polled when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.cloudflarestatus.com";

/// One of the documents fetched per refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Status,
    Components,
    UpcomingMaintenances,
    ActiveMaintenances,
    UnresolvedIncidents,
}

impl Endpoint {
    /// Path relative to the page's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Status => "api/v2/status.json",
            Endpoint::Components => "api/v2/components.json",
            Endpoint::UpcomingMaintenances => "api/v2/scheduled-maintenances/upcoming.json",
            Endpoint::ActiveMaintenances => "api/v2/scheduled-maintenances/active.json",
            Endpoint::UnresolvedIncidents => "api/v2/incidents/unresolved.json",
        }
    }

    /// Short name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Status => "status data",
            Endpoint::Components => "components data",
            Endpoint::UpcomingMaintenances => "upcoming maintenance data",
            Endpoint::ActiveMaintenances => "active maintenance data",
            Endpoint::UnresolvedIncidents => "incidents data",
        }
    }

    /// Full URL for this endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Settings for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Status page root, e.g. "https://www.cloudflarestatus.com".
    pub base_url: String,
    /// Time between refresh cycles.
    pub refresh_interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(60),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpSourceConfig {
    /// Build the HTTP client used for every request.
    pub fn build_client(&self) -> Result<Client, SourceError> {
        Ok(Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("statuswatch/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    endpoint: Endpoint,
) -> Result<T, SourceError> {
    let url = endpoint.url(base_url);
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(SourceError::Status {
            endpoint: endpoint.label().to_string(),
            status: response.status().as_u16(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| SourceError::Parse(format!("{}: {}", endpoint.label(), e)))
}

/// Fetch all five documents and bundle them into one snapshot.
///
/// Any failing request fails the whole cycle, so callers never see a
/// snapshot mixing two refreshes.
pub async fn fetch_snapshot(
    client: &Client,
    base_url: &str,
) -> Result<StatusSnapshot, SourceError> {
    let (status, components, upcoming_maintenances, active_maintenances, incidents) =
        tokio::try_join!(
            get_json::<StatusPayload>(client, base_url, Endpoint::Status),
            get_json::<ComponentsPayload>(client, base_url, Endpoint::Components),
            get_json::<MaintenancesPayload>(client, base_url, Endpoint::UpcomingMaintenances),
            get_json::<MaintenancesPayload>(client, base_url, Endpoint::ActiveMaintenances),
            get_json::<IncidentsPayload>(client, base_url, Endpoint::UnresolvedIncidents),
        )?;

    Ok(StatusSnapshot {
        status,
        components,
        incidents,
        upcoming_maintenances,
        active_maintenances,
    })
}

/// A data source that polls a status page over HTTP.
///
/// Must be created inside a tokio runtime. The background task stops when
/// the source is dropped.
///
/// # Example
///
/// ```no_run
/// use statuswatch::{HttpSource, HttpSourceConfig};
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::spawn(HttpSourceConfig::default()).unwrap();
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<Result<StatusSnapshot, SourceError>>,
    refresh: Arc<Notify>,
    description: String,
    last_error: Option<String>,
    task: JoinHandle<()>,
}

impl HttpSource {
    /// Spawn the background refresh task.
    ///
    /// The first fetch starts immediately, later ones every
    /// `config.refresh_interval` or on [`DataSource::request_refresh`].
    pub fn spawn(config: HttpSourceConfig) -> Result<Self, SourceError> {
        let client = config.build_client()?;
        let (tx, rx) = mpsc::channel(4);
        let refresh = Arc::new(Notify::new());
        let notified = refresh.clone();
        let description = format!("http: {}", config.base_url);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = notified.notified() => ticker.reset(),
                }

                debug!(base_url = %config.base_url, "refreshing status snapshot");
                let outcome = fetch_snapshot(&client, &config.base_url).await;
                match &outcome {
                    Ok(snapshot) => info!(
                        components = snapshot.components.components.len(),
                        incidents = snapshot.incidents.incidents.len(),
                        "status snapshot refreshed"
                    ),
                    Err(e) => warn!(error = %e, "status refresh failed"),
                }

                if tx.send(outcome).await.is_err() {
                    // Receiver dropped
                    break;
                }
            }
        });

        Ok(Self {
            receiver: rx,
            refresh,
            description,
            last_error: None,
            task,
        })
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        // Drain every finished cycle; the newest snapshot wins and the newest
        // outcome decides the error state
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(Ok(snapshot)) => {
                    self.last_error = None;
                    latest = Some(snapshot);
                }
                Ok(Err(e)) => self.last_error = Some(e.to_string()),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.last_error = Some("Refresh task stopped".to_string());
                    break;
                }
            }
        }
        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn request_refresh(&mut self) {
        self.refresh.notify_one();
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.task.abort();
    }
}
