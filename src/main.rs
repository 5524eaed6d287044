use std::{
    process,
    sync::{Arc, OnceLock},
};

use hostprobe::{
    config::Config,
    core::{collectors::registry::Collectors, snapshot::Snapshot},
    logger::LoggerManager,
    print_error,
};
use tracing::{debug, error, info};

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        Config::new().unwrap_or_else(|e| {
            print_error!("{}", e);
            process::exit(1);
        })
    })
}

fn log_collectors_table(enabled: Vec<&str>, available: Vec<&'static str>) {
    use std::collections::BTreeSet;

    let enabled_set: BTreeSet<&str> = enabled.into_iter().collect();
    let available_set: BTreeSet<&str> = available.into_iter().collect();

    // Union of both sets to show *everything* explicitly
    let all_names: BTreeSet<&str> = enabled_set
        .iter()
        .copied()
        .chain(available_set.iter().copied())
        .collect();

    let name_width = all_names
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(10)
        .max("Collector".len());

    let header = format!("{:<width$} | Status", "Collector", width = name_width);
    let sep = format!("{}-+-{}", "-".repeat(name_width), "-".repeat(12));

    debug!("{}", header);
    debug!("{}", sep);

    for name in all_names {
        let status = match (enabled_set.contains(name), available_set.contains(name)) {
            (true, true) => "ENABLED",
            (true, false) => "ENABLED (missing)",
            (false, true) => "DISABLED",
            (false, false) => "UNKNOWN",
        };

        debug!("{:<width$} | {}", name, status, width = name_width);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config();
    let mut logger_manager = LoggerManager::new(cfg.logger.clone()).unwrap_or_else(|e| {
        print_error!("Failed to setup Log Manager: {}", e);
        process::exit(1);
    });
    logger_manager.init().unwrap_or_else(|e| {
        print_error!("Failed to init Log Manager: {}", e);
        process::exit(1);
    });
    info!("Starting hostprobe version {}...", env!("CARGO_PKG_VERSION"));
    debug!("Log level: {}", cfg.logger.level);

    log_collectors_table(cfg.inventory.collectors.enabled_names(), Collectors::list());

    let snapshot = Snapshot::new(Arc::new(cfg.inventory.clone()));
    let outcome = snapshot.collect().await;

    for name in &outcome.failed {
        debug!("Collector '{}' produced no data", name);
    }

    if outcome.is_total_failure() {
        error!("Every enabled collector failed, no report to print");
        process::exit(1);
    }

    let report = serde_json::Value::Object(outcome.report);
    let rendered = if cfg.inventory.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", rendered);

    Ok(())
}
