// ── Device scanner ──
//
// One `LinksysScanner` per router. Each refresh is a fresh login followed
// by a client list fetch; the last successful result is cached and handed
// to the host until a later refresh finds clients again.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use linkscan_api::{EncodedPassword, RouterClient, encode_password};

use crate::config::ScannerConfig;
use crate::error::CoreError;
use crate::model::{MacAddress, RefreshOutcome, ScanResult};

/// Host-facing scanner contract.
///
/// The host decides when to scan and how to turn successive lists into
/// presence events; a scanner only reports who is connected right now
/// (or, after a failed refresh, who was connected last time it knew).
#[async_trait]
pub trait DeviceScanner: Send + Sync {
    /// Refresh from the router, then return the last known-good device list.
    async fn scan_devices(&self) -> Vec<MacAddress>;

    /// The last known-good device list, without touching the network.
    fn last_results(&self) -> Vec<MacAddress>;

    /// A friendly name for `device`, if the backend can provide one.
    fn device_name(&self, device: &MacAddress) -> Option<String>;
}

/// Scanner for Linksys E900 class firmware.
///
/// Cheaply cloneable via `Arc<ScannerInner>`. Refreshes on one instance
/// are serialized; readers of the cached snapshot never wait on them.
#[derive(Clone)]
pub struct LinksysScanner {
    inner: Arc<ScannerInner>,
}

struct ScannerInner {
    client: RouterClient,
    username: String,
    /// Encoded once; the plaintext is not kept.
    password: EncodedPassword,
    /// Last successful result. `None` until the first success.
    cache: ArcSwapOption<ScanResult>,
    /// Outcome of the most recent refresh, successful or not.
    last_outcome: ArcSwapOption<RefreshOutcome>,
    /// Held for the whole login + fetch so two polls never interleave
    /// sessions on the router.
    refresh_lock: Mutex<()>,
}

impl LinksysScanner {
    /// Build a scanner and perform the first refresh.
    ///
    /// Fails if the configuration is invalid or the router cannot be
    /// reached. A reachable router that lists no clients still yields a
    /// scanner, just with an empty cache.
    pub async fn connect(config: ScannerConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let client = RouterClient::new(config.host.clone(), &config.transport())?;
        let scanner = Self::with_client(client, config.username.clone(), &config.password);

        let first = scanner.try_refresh().await.map_err(|e| {
            warn!(host = %config.host, error = %e, "router unreachable during setup");
            CoreError::from(e)
        })?;

        if !first.success {
            debug!(outcome = ?first.outcome, "initial scan found no clients");
        }

        Ok(scanner)
    }

    /// Build a scanner around an existing client. No request is made.
    pub fn with_client(
        client: RouterClient,
        username: impl Into<String>,
        password: &SecretString,
    ) -> Self {
        Self {
            inner: Arc::new(ScannerInner {
                client,
                username: username.into(),
                password: encode_password(password.expose_secret()),
                cache: ArcSwapOption::empty(),
                last_outcome: ArcSwapOption::empty(),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    /// The router address being scanned.
    pub fn host(&self) -> &str {
        self.inner.client.host()
    }

    /// Log in, fetch the client list and update the cache on success.
    ///
    /// Never fails: an unreachable router is reported through
    /// [`RefreshOutcome::Unreachable`] and the previous snapshot is kept.
    pub async fn refresh(&self) -> ScanResult {
        let _guard = self.inner.refresh_lock.lock().await;
        match self.refresh_locked().await {
            Ok(result) => result,
            Err(e) => {
                warn!(host = %self.host(), error = %e, "refresh failed; keeping previous results");
                let outcome = RefreshOutcome::Unreachable {
                    reason: e.to_string(),
                };
                self.inner.last_outcome.store(Some(Arc::new(outcome.clone())));
                ScanResult::failed(outcome)
            }
        }
    }

    /// The last successful scan, if any.
    pub fn cached_result(&self) -> Option<Arc<ScanResult>> {
        self.inner.cache.load_full()
    }

    /// How the most recent refresh went. `None` before the first one.
    pub fn last_outcome(&self) -> Option<Arc<RefreshOutcome>> {
        self.inner.last_outcome.load_full()
    }

    async fn try_refresh(&self) -> Result<ScanResult, linkscan_api::Error> {
        let _guard = self.inner.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// One login + fetch. Callers hold `refresh_lock`.
    async fn refresh_locked(&self) -> Result<ScanResult, linkscan_api::Error> {
        let client = &self.inner.client;

        info!(host = %client.host(), "loading wireless clients");

        let session = client
            .login(&self.inner.username, &self.inner.password)
            .await?;
        let found = client.list_wireless_clients(&session).await?;

        let macs: Vec<MacAddress> = found.into_iter().map(MacAddress::from).collect();
        let outcome = match (macs.len(), session.is_empty()) {
            (0, true) => RefreshOutcome::SessionNotGranted,
            (0, false) => RefreshOutcome::NoClients,
            (count, _) => RefreshOutcome::Updated { count },
        };

        self.inner.last_outcome.store(Some(Arc::new(outcome.clone())));

        let result = ScanResult::from_outcome(outcome, macs);
        if result.success {
            info!(count = result.mac_addresses.len(), "wireless client list updated");
            self.inner.cache.store(Some(Arc::new(result.clone())));
        } else {
            warn!(outcome = ?result.outcome, "no wireless clients found; keeping previous results");
        }

        Ok(result)
    }
}

#[async_trait]
impl DeviceScanner for LinksysScanner {
    async fn scan_devices(&self) -> Vec<MacAddress> {
        self.refresh().await;
        self.last_results()
    }

    fn last_results(&self) -> Vec<MacAddress> {
        self.inner
            .cache
            .load()
            .as_ref()
            .map(|r| r.mac_addresses.clone())
            .unwrap_or_default()
    }

    /// This firmware does not expose client names.
    fn device_name(&self, _device: &MacAddress) -> Option<String> {
        None
    }
}

impl std::fmt::Debug for LinksysScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinksysScanner")
            .field("host", &self.host())
            .finish_non_exhaustive()
    }
}
