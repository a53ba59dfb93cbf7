// src/logging.rs

use crate::config::Config;
use crate::errors::CopilotoResult;
use crate::models::ApiCallLog;
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle};

/// Starts the file logger. The terminal belongs to the UI, so nothing is
/// written to stderr. Keep the returned handle alive for the whole run.
pub fn init_logging(config: &Config) -> CopilotoResult<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_directory)
                .basename("copiloto")
                .suppress_timestamp(),
        )
        .append()
        .format(detailed_format)
        .start()?;

    Ok(handle)
}

/// Records an API call in the log.
pub fn log_api_call(log: &ApiCallLog) {
    let entry = format_api_call(log);
    if (200..300).contains(&log.response_status) {
        log::info!("{}", entry);
    } else {
        log::warn!("{}", entry);
    }
}

fn format_api_call(log: &ApiCallLog) -> String {
    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_api_call() {
        let log = ApiCallLog {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            endpoint: "/api/stats".to_string(),
            request_summary: "GET stats".to_string(),
            response_status: 200,
            response_time_ms: 42,
        };
        assert_eq!(
            format_api_call(&log),
            "[2024-03-01T12:00:00+00:00] /api/stats - GET stats - Status: 200 - Time: 42ms"
        );
    }
}
