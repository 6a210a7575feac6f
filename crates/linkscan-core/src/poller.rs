// ── Background polling ──
//
// Host-side helper that calls `scan_devices()` on a fixed interval and
// publishes each list on a `watch` channel. Scans never overlap: the next
// tick is only awaited once the previous scan has returned.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::model::MacAddress;
use crate::scanner::DeviceScanner;

/// Shortest accepted polling interval.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running poll loop.
pub struct Poller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
    devices: watch::Receiver<Arc<Vec<MacAddress>>>,
}

impl Poller {
    /// Start polling `scanner` every `interval` (at least [`MIN_INTERVAL`]).
    ///
    /// The channel starts with the scanner's current cached list, and the
    /// first scan happens one interval from now: a freshly connected
    /// scanner has just refreshed.
    pub fn spawn(scanner: Arc<dyn DeviceScanner>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(Arc::new(scanner.last_results()));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_task(
            scanner,
            interval.max(MIN_INTERVAL),
            tx,
            cancel.clone(),
        ));

        Self {
            cancel,
            handle,
            devices: rx,
        }
    }

    /// Subscribe to device lists. Every completed scan notifies, even if
    /// the list did not change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<MacAddress>>> {
        self.devices.clone()
    }

    /// Stop polling and wait for an in-flight scan to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

async fn poll_task(
    scanner: Arc<dyn DeviceScanner>,
    period: Duration,
    tx: watch::Sender<Arc<Vec<MacAddress>>>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let devices = scanner.scan_devices().await;
                debug!(count = devices.len(), "poll complete");
                tx.send_replace(Arc::new(devices));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Returns the scripted lists in order, then repeats the last one.
    struct ScriptedScanner {
        script: Vec<Vec<MacAddress>>,
        calls: AtomicUsize,
        last: Mutex<Vec<MacAddress>>,
    }

    impl ScriptedScanner {
        fn new(script: Vec<Vec<&str>>) -> Self {
            Self {
                script: script
                    .into_iter()
                    .map(|l| l.into_iter().map(MacAddress::from).collect())
                    .collect(),
                calls: AtomicUsize::new(0),
                last: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DeviceScanner for ScriptedScanner {
        async fn scan_devices(&self) -> Vec<MacAddress> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let list = self.script[n.min(self.script.len() - 1)].clone();
            *self.last.lock().unwrap() = list.clone();
            list
        }

        fn last_results(&self) -> Vec<MacAddress> {
            self.last.lock().unwrap().clone()
        }

        fn device_name(&self, _device: &MacAddress) -> Option<String> {
            None
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_each_scan() {
        let scanner = Arc::new(ScriptedScanner::new(vec![
            vec!["00:11:22:33:44:55"],
            vec!["00:11:22:33:44:55", "66:77:88:99:aa:bb"],
        ]));
        let poller = Poller::spawn(scanner.clone(), Duration::from_secs(30));
        let mut rx = poller.subscribe();

        assert!(rx.borrow().is_empty());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 2);

        poller.shutdown().await;
        assert_eq!(scanner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_scanning() {
        let scanner = Arc::new(ScriptedScanner::new(vec![vec!["00:11:22:33:44:55"]]));
        let poller = Poller::spawn(scanner.clone(), Duration::from_secs(10));

        poller.shutdown().await;
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(scanner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_is_clamped() {
        let scanner = Arc::new(ScriptedScanner::new(vec![vec!["00:11:22:33:44:55"]]));
        let poller = Poller::spawn(scanner.clone(), Duration::ZERO);
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap();
        poller.shutdown().await;
        assert!(scanner.calls.load(Ordering::SeqCst) >= 1);
    }
}
