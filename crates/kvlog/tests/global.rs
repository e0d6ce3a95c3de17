//! The process-wide logger. Kept to a single test so nothing else in this
//! binary races on the global state.

use kvlog::{kv, Config, ConfigError, Level, LevelFilter, Logger, MemoryWriter};

fn install_capture(config: Config) -> MemoryWriter {
    let memory = MemoryWriter::new();
    kvlog::install(Logger::with_writer(config, memory.clone()).unwrap());
    memory
}

#[test]
fn test_process_wide_logger_lifecycle() {
    // Defaults before any configuration.
    assert_eq!(kvlog::logger().level_filter(), LevelFilter::Info);
    assert_eq!(kvlog::logger().format(), kvlog::Format::Text);

    // Bad configuration is reported and leaves the current logger in place.
    assert_eq!(
        kvlog::try_set_logger(Config::default().with_level("chatty")),
        Err(ConfigError::Level("chatty".to_string()))
    );
    assert_eq!(
        kvlog::try_set_logger(Config::default().with_format("yaml")),
        Err(ConfigError::Format("yaml".to_string()))
    );
    assert!(kvlog::try_set_logger(None::<Config>).is_ok());
    assert_eq!(kvlog::logger().level_filter(), LevelFilter::Info);

    // Package-level functions go through the installed logger.
    let first = install_capture(Config::default().with_level("warn"));
    kvlog::debug("d", &[]);
    kvlog::info("i", &[]);
    kvlog::warn("w", &kv!["disk" => "sda"]);
    kvlog::error("e", &[]);
    kvlog::log(Level::Error, "l", &[]);
    let line = line!() - 1;

    let lines = first.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("level=warn msg=w disk=sda"));
    assert!(lines[1].contains("level=error msg=e"));
    assert!(lines[2].contains(&format!("caller=global.rs:{} level=error msg=l", line)));

    // Derived loggers keep the sink they were created from.
    let request = kvlog::with(&kv!["request_id" => 42]);
    let second = install_capture(Config::default().with_level("debug").without_caller());
    request.warn("still first", &[]);
    kvlog::with(&kv!["request_id" => 43]).debug("second", &[]);

    let first_lines = first.lines();
    assert_eq!(first_lines.len(), 4);
    assert!(first_lines[3].contains("request_id=42 level=warn msg=\"still first\""));
    assert_eq!(second.lines().len(), 1);
    assert!(second.lines()[0].contains("request_id=43 level=debug msg=second"));
}
