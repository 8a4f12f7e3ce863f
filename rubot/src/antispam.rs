//! Per-user message-rate limiting with time-boxed punishments.
//!
//! Window state lives in memory and resets on restart; punishments are
//! persisted to a JSON file (user id -> expiry, rewritten in full on every
//! mutation) and survive restarts.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tracing::error;

/// Tracks per-user message timestamps in a sliding window and punishes users
/// who exceed the threshold.
pub struct AntiSpamManager {
    spam_threshold: usize,
    time_window: Duration,
    punishment_duration: Duration,
    data_file: PathBuf,
    windows: Mutex<HashMap<String, VecDeque<f64>>>,
    punished: Mutex<HashMap<String, f64>>,
}

impl AntiSpamManager {
    /// `spam_threshold` messages are allowed within `time_window`; exceeding
    /// it punishes the user for `punishment_duration`. Punishments persist in
    /// `data_file`; an unreadable or corrupt file degrades to an empty state.
    pub fn new(
        spam_threshold: usize,
        time_window: Duration,
        punishment_duration: Duration,
        data_file: impl Into<PathBuf>,
    ) -> Self {
        let data_file = data_file.into();
        let punished = Mutex::new(load_punished(&data_file));
        Self {
            spam_threshold,
            time_window,
            punishment_duration,
            data_file,
            windows: Mutex::new(HashMap::new()),
            punished,
        }
    }

    /// True iff the user has a punishment that has not yet expired. An expired
    /// entry is purged (and the purge persisted) the first time it is seen.
    pub fn is_punished(&self, user_id: &str) -> bool {
        let mut punished = self.punished.lock().expect("punished lock poisoned");
        if let Some(expiry) = punished.get(user_id).copied() {
            if now_secs() < expiry {
                return true;
            }
            punished.remove(user_id);
            self.save_punished(&punished);
        }
        false
    }

    /// Records the current message, evicts window entries older than the time
    /// window, and returns true (starting a punishment) iff the window now
    /// exceeds the threshold.
    pub fn check_and_punish(&self, user_id: &str) -> bool {
        let now = now_secs();
        let window_secs = self.time_window.as_secs_f64();

        let over_threshold = {
            let mut windows = self.windows.lock().expect("windows lock poisoned");
            let timestamps = windows.entry(user_id.to_string()).or_default();
            timestamps.push_back(now);
            while timestamps.front().is_some_and(|t| *t < now - window_secs) {
                timestamps.pop_front();
            }
            timestamps.len() > self.spam_threshold
        };

        if over_threshold {
            let expiry = now + self.punishment_duration.as_secs_f64();
            let mut punished = self.punished.lock().expect("punished lock poisoned");
            punished.insert(user_id.to_string(), expiry);
            self.save_punished(&punished);
        }
        over_threshold
    }

    fn save_punished(&self, punished: &HashMap<String, f64>) {
        match serde_json::to_string(punished) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.data_file, json) {
                    error!(path = %self.data_file.display(), error = %e, "failed to save punishment data");
                }
            }
            Err(e) => error!(error = %e, "failed to encode punishment data"),
        }
    }
}

impl Default for AntiSpamManager {
    /// 10 messages per 10 seconds; 5-minute punishments; `antispam_data.json`.
    fn default() -> Self {
        Self::new(
            10,
            Duration::from_secs(10),
            Duration::from_secs(300),
            "antispam_data.json",
        )
    }
}

fn load_punished(path: &Path) -> HashMap<String, f64> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => HashMap::new(),
    }
}

fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
