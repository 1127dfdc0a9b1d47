// src/logging.rs

use crate::errors::{ParleyError, ParleyResult};
use crate::models::ExchangeLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::fs::OpenOptions;
use std::io::Write;

/// Starts the diagnostic logger. The TUI owns the terminal, so everything
/// goes to a file. The returned handle must stay alive for the process
/// lifetime.
pub fn init_logging(log_level: &str) -> ParleyResult<LoggerHandle> {
    Logger::try_with_str(log_level)
        .map_err(|e| ParleyError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().basename("parley").suppress_timestamp())
        .start()
        .map_err(|e| ParleyError::config_error(format!("Failed to start logger: {}", e)))
}

/// Appends one line per backend call to the `exchanges.log` file.
pub fn log_exchange(log: &ExchangeLog) {
    let log_entry = format_exchange(log);

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("exchanges.log");

    match file {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                log::error!("Failed to write to exchange log: {}", e);
            }
        }
        Err(e) => log::error!("Failed to open exchange log: {}", e),
    }
}

fn format_exchange(log: &ExchangeLog) -> String {
    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.query_summary,
        log.response_status,
        log.response_time_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_exchange_contains_all_fields() {
        let log = ExchangeLog {
            timestamp: Utc::now(),
            endpoint: "http://localhost:5000/query".to_string(),
            query_summary: "hello".to_string(),
            response_status: 200,
            response_time_ms: 42,
        };

        let line = format_exchange(&log);
        assert!(line.contains("http://localhost:5000/query"));
        assert!(line.contains("hello"));
        assert!(line.contains("Status: 200"));
        assert!(line.contains("Time: 42ms"));
        assert!(line.ends_with('\n'));
    }
}
