//! Logging initialization; kept in its own binary since it installs the
//! global subscriber.

use hrprep_cli::logging::{LogConfig, LogFormat, REDACTED_VALUE, init_logging_with_writer, redact_value};

#[test]
fn log_data_flag_controls_redaction() {
    assert_eq!(redact_value("city_103"), REDACTED_VALUE);

    let config = LogConfig::from_verbosity(2)
        .with_format(LogFormat::Json)
        .with_env_filter(false)
        .with_log_data(true);
    init_logging_with_writer(&config, std::io::sink);

    assert_eq!(redact_value("city_103"), "city_103");
    tracing::trace!(value = redact_value("city_103"), "logged after init");
}
