use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;
use flate2::{write::GzEncoder, Compression};
use fs2::FileExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::network::types::{get_local_timestamp, parse_env_bool};

pub const DEBUG_ENV_VAR: &str = "COLLECTOR_CHECK_DEBUG";

// Hardcoded rotation policy
const LOG_ROTATION_SIZE_MB: u64 = 8;
const MAX_ARCHIVES: u32 = 5;
const ROTATION_CHECK_INTERVAL: u32 = 200;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,                            // ISO-8601 with timezone
    pub level: String,                                // DEBUG, ERROR, NETWORK, TASK
    pub component: String,                            // Component name
    pub event: String,                                // Event type
    pub message: String,                              // Human readable message (redacted)
    pub correlation_id: Option<String>,               // Ties probe start/end together
    pub fields: HashMap<String, serde_json::Value>,   // Structured data
}

struct RotatingLogger {
    log_path: PathBuf,
    write_count: AtomicU32,
}

impl RotatingLogger {
    fn new(log_path: PathBuf) -> Self {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        Self {
            log_path,
            write_count: AtomicU32::new(0),
        }
    }

    fn write_with_rotation(&self, json_line: &str) -> Result<(), std::io::Error> {
        if self.write_count.fetch_add(1, Ordering::Relaxed) % ROTATION_CHECK_INTERVAL == 0 {
            let _ = self.rotate_if_needed(); // Rotation problems never stop logging
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        writeln!(file, "{}", json_line)?;
        Ok(())
    }

    fn rotate_if_needed(&self) -> Result<(), std::io::Error> {
        if !self.needs_rotation()? {
            return Ok(());
        }

        // Several checks may run in parallel processes; one rotates
        let lock_path = self.log_path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        if lock_file.try_lock_exclusive().is_ok() {
            if self.needs_rotation()? {
                self.perform_rotation()?;
            }
            let _ = std::fs::remove_file(&lock_path);
        }
        Ok(())
    }

    fn needs_rotation(&self) -> Result<bool, std::io::Error> {
        if !self.log_path.exists() {
            return Ok(false);
        }

        let metadata = std::fs::metadata(&self.log_path)?;
        Ok(metadata.len() >= LOG_ROTATION_SIZE_MB * 1024 * 1024)
    }

    fn base_name(&self) -> String {
        self.log_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collector-check-debug".to_string())
    }

    fn log_dir(&self) -> &Path {
        self.log_path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn perform_rotation(&self) -> Result<(), std::io::Error> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let archive_path = self
            .log_dir()
            .join(format!("{}.{}.gz", self.base_name(), timestamp));

        let temp_path = self.log_path.with_extension("rotating");
        std::fs::rename(&self.log_path, &temp_path)?;

        let source_file = File::open(&temp_path)?;
        let target_file = File::create(&archive_path)?;
        let mut encoder = GzEncoder::new(target_file, Compression::default());
        std::io::copy(&mut BufReader::new(source_file), &mut encoder)?;
        encoder.finish()?;

        std::fs::remove_file(&temp_path)?;

        let _ = self.cleanup_old_archives();
        Ok(())
    }

    fn cleanup_old_archives(&self) -> Result<(), std::io::Error> {
        let prefix = format!("{}.", self.base_name());

        let mut archives = Vec::new();
        for entry in std::fs::read_dir(self.log_dir())? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with(&prefix) && name.ends_with(".gz") {
                archives.push((entry.path(), entry.metadata()?.modified()?));
            }
        }

        archives.sort_by_key(|(_, modified)| *modified);
        if archives.len() > MAX_ARCHIVES as usize {
            let to_remove = archives.len() - MAX_ARCHIVES as usize;
            for (path, _) in archives.iter().take(to_remove) {
                let _ = std::fs::remove_file(path);
            }
        }

        Ok(())
    }
}

/// JSON Lines debug logger for diagnostics runs
///
/// Disabled unless `COLLECTOR_CHECK_DEBUG` is truthy. Every write is best
/// effort: a logging failure never reaches the caller.
pub struct DebugLogger {
    enabled: bool,
    rotating_logger: Option<Arc<Mutex<RotatingLogger>>>,
    session_id: String,
    redaction_patterns: Vec<Regex>,
}

impl DebugLogger {
    pub fn new() -> Self {
        let enabled = parse_env_bool(DEBUG_ENV_VAR);
        let log_path = if enabled { Some(Self::default_log_path()) } else { None };
        Self::build(log_path)
    }

    /// Logger that always writes to `log_path`, regardless of the environment
    pub fn with_path(log_path: PathBuf) -> Self {
        Self::build(Some(log_path))
    }

    fn build(log_path: Option<PathBuf>) -> Self {
        let session_id = Uuid::new_v4().to_string()[..8].to_string();
        let rotating_logger =
            log_path.map(|path| Arc::new(Mutex::new(RotatingLogger::new(path))));

        Self {
            enabled: rotating_logger.is_some(),
            rotating_logger,
            session_id,
            redaction_patterns: Self::compile_redaction_patterns(),
        }
    }

    pub fn default_log_path() -> PathBuf {
        let mut log_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        log_path.push(".collector-check");
        log_path.push("collector-check-debug.log");
        log_path
    }

    fn compile_redaction_patterns() -> Vec<Regex> {
        let patterns = [
            r"(?i)authorization[:\s]+[^\s\n]+",
            r"(?i)bearer[:\s]+[^\s\n]+",
            r"(?i)token[:\s]+[^\s\n]+",
            r"(?i)password[:\s]+[^\s\n]+",
            r"(?i)api[_-]?key[:\s]+[^\s\n]+",
            r"(?i)license[_-]?key[:=\s]+[^\s\n]+",
            r"(?i)secret[:\s]+[^\s\n]+",
            // Credentials embedded in proxy URLs
            r"://[^/\s:@]+:[^/\s@]+@",
        ];

        patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    }

    /// Redaction guardrails for sensitive data
    pub fn redact_sensitive_data(&self, text: &str) -> String {
        let mut redacted = text.to_string();

        for regex in &self.redaction_patterns {
            redacted = regex.replace_all(&redacted, "[REDACTED]").to_string();
        }

        // Long opaque strings are probably keys
        if redacted.len() > 100
            && !redacted.contains(' ')
            && redacted
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_".contains(c))
        {
            redacted = format!("[REDACTED_LONG_STRING_{}chars]", redacted.len());
        }

        redacted
    }

    fn log_sync(
        &self,
        level: &str,
        component: &str,
        event: &str,
        message: &str,
        correlation_id: Option<String>,
        fields: HashMap<String, serde_json::Value>,
    ) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            timestamp: get_local_timestamp(),
            level: level.to_string(),
            component: component.to_string(),
            event: event.to_string(),
            message: self.redact_sensitive_data(message),
            correlation_id: correlation_id.or_else(|| Some(self.session_id.clone())),
            fields,
        };

        if let Some(logger) = &self.rotating_logger {
            if let Ok(logger) = logger.lock() {
                if let Ok(json_line) = serde_json::to_string(&entry) {
                    let _ = logger.write_with_rotation(&json_line);
                }
            }
        }
    }

    pub fn debug_sync(&self, component: &str, event: &str, message: &str) {
        self.log_sync("DEBUG", component, event, message, None, HashMap::new());
    }

    pub fn error_sync(&self, component: &str, event: &str, message: &str) {
        self.log_sync("ERROR", component, event, message, None, HashMap::new());
    }

    // Typed events

    pub fn probe_start(&self, url: &str, timeout_secs: u64, correlation_id: String) {
        let mut fields = HashMap::new();
        fields.insert("url".to_string(), serde_json::Value::String(url.to_string()));
        fields.insert("timeout_secs".to_string(), timeout_secs.into());

        self.log_sync(
            "NETWORK",
            "Probe",
            "probe_start",
            &format!("GET {}", url),
            Some(correlation_id),
            fields,
        );
    }

    pub fn probe_end(
        &self,
        outcome: &str,
        http_status: Option<u16>,
        duration_ms: u64,
        correlation_id: String,
    ) {
        let mut fields = HashMap::new();
        fields.insert("outcome".to_string(), serde_json::Value::String(outcome.to_string()));
        fields.insert("duration_ms".to_string(), duration_ms.into());
        if let Some(code) = http_status {
            fields.insert("http_status".to_string(), code.into());
        }

        self.log_sync(
            "NETWORK",
            "Probe",
            "probe_end",
            &format!("Probe completed: {} ({}ms)", outcome, duration_ms),
            Some(correlation_id),
            fields,
        );
    }

    pub fn gate_skip(&self, task_id: &str, regions: &[String]) {
        let mut fields = HashMap::new();
        fields.insert("task".to_string(), serde_json::Value::String(task_id.to_string()));
        fields.insert("regions".to_string(), serde_json::json!(regions));

        self.log_sync(
            "TASK",
            "RegionGate",
            "gate_skip",
            &format!("{} skipped, detected regions: {}", task_id, regions.join(",")),
            None,
            fields,
        );
    }

    pub fn phase_change(&self, task_id: &str, from: &str, to: &str) {
        let mut fields = HashMap::new();
        fields.insert("task".to_string(), serde_json::Value::String(task_id.to_string()));
        fields.insert("from".to_string(), serde_json::Value::String(from.to_string()));
        fields.insert("to".to_string(), serde_json::Value::String(to.to_string()));

        self.log_sync(
            "TASK",
            "CollectorConnect",
            "phase_change",
            &format!("{}: {} -> {}", task_id, from, to),
            None,
            fields,
        );
    }

    pub fn task_complete(&self, task_id: &str, status: &str, duration_ms: u64) {
        let mut fields = HashMap::new();
        fields.insert("task".to_string(), serde_json::Value::String(task_id.to_string()));
        fields.insert("status".to_string(), serde_json::Value::String(status.to_string()));
        fields.insert("duration_ms".to_string(), duration_ms.into());

        self.log_sync(
            "TASK",
            "Runner",
            "task_complete",
            &format!("{} finished: {} ({}ms)", task_id, status, duration_ms),
            None,
            fields,
        );
    }

    pub fn dependency_missing(&self, task_id: &str, dependency: &str) {
        let mut fields = HashMap::new();
        fields.insert("task".to_string(), serde_json::Value::String(task_id.to_string()));
        fields.insert(
            "dependency".to_string(),
            serde_json::Value::String(dependency.to_string()),
        );

        self.log_sync(
            "TASK",
            "Runner",
            "dependency_missing",
            &format!("{} has no upstream result for {}", task_id, dependency),
            None,
            fields,
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get_session_id(&self) -> &str {
        &self.session_id
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_debug_logger() -> DebugLogger {
    DebugLogger::new()
}
