//! Severe-reading alert dispatch.
//!
//! Alerting is advisory: when a persisted reading crosses the severity
//! threshold, one notification attempt is made on a detached task and its
//! outcome is discarded (logged at `warn`, never surfaced to the caller).
//! No retry, no queue, no dedup across repeated severe readings.

use std::sync::Arc;

use async_trait::async_trait;

// ---

/// AQI at or above this value fires a notification.
pub const ALERT_THRESHOLD: i32 = 300;

/// Outbound notification channel.
///
/// Constructed once at startup and passed into the dispatcher explicitly;
/// there is no module-level transport singleton.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// [`Notifier`] that posts alerts as JSON to a configured webhook.
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        // ---
        self.http
            .post(&self.url)
            .json(&serde_json::json!({
                "to": to,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

// ---

/// Whether an AQI value qualifies for an alert.
pub fn is_severe(aqi: i32) -> bool {
    aqi >= ALERT_THRESHOLD
}

/// Fire-and-forget alert for a qualifying reading.
///
/// Returns immediately; the send runs detached and the caller's write path
/// never waits on it. The returned handle exists so tests can await the
/// attempt; production callers drop it.
pub fn dispatch_if_severe(
    notifier: Arc<dyn Notifier>,
    recipient: String,
    ward: &str,
    aqi: i32,
) -> Option<tokio::task::JoinHandle<()>> {
    // ---
    if !is_severe(aqi) {
        return None;
    }

    let subject = format!("AQI Alert — {ward}");
    let body = format!("AQI is {aqi} in ward {ward}");
    let ward = ward.to_string();

    Some(tokio::spawn(async move {
        if let Err(e) = notifier.send(&recipient, &subject, &body).await {
            tracing::warn!("alert delivery failed for {ward} (aqi {aqi}): {e}");
        } else {
            tracing::info!("alert sent for {ward} (aqi {aqi})");
        }
    }))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts send attempts; optionally fails every one of them.
    struct CountingNotifier {
        attempts: AtomicUsize,
        fail: bool,
    }

    impl CountingNotifier {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                attempts: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> anyhow::Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("delivery refused");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_below_threshold_never_dispatches() {
        // ---
        let notifier = CountingNotifier::new(false);

        for aqi in [0, 120, 299] {
            let handle =
                dispatch_if_severe(notifier.clone(), "ops@example.org".into(), "Rohini", aqi);
            assert!(handle.is_none(), "aqi {aqi} should not alert");
        }

        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_at_threshold_dispatches_exactly_once() {
        // ---
        let notifier = CountingNotifier::new(false);

        let handle =
            dispatch_if_severe(notifier.clone(), "ops@example.org".into(), "Anand Vihar", 300)
                .expect("aqi 300 must alert");
        handle.await.unwrap();

        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_severe_reading_dispatches() {
        // ---
        let notifier = CountingNotifier::new(false);

        let handle =
            dispatch_if_severe(notifier.clone(), "ops@example.org".into(), "Anand Vihar", 350)
                .expect("aqi 350 must alert");
        handle.await.unwrap();

        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        // ---
        let notifier = CountingNotifier::new(true);

        let handle =
            dispatch_if_severe(notifier.clone(), "ops@example.org".into(), "Okhla", 420)
                .expect("aqi 420 must alert");

        // The task must not panic even though the send failed.
        handle.await.unwrap();
        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_severity_boundary() {
        // ---
        assert!(!is_severe(299));
        assert!(is_severe(300));
        assert!(is_severe(301));
    }
}
