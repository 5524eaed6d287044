//! hostprobe — hardware and software inventory snapshot for Linux hosts
//!
//! This crate collects a one-shot inventory of a Linux machine from the
//! `/proc` and `/sys` filesystems and a couple of external report
//! commands (`lspci`, `xdpyinfo`), and prints it as a single JSON
//! document. It is built for provisioning and fleet-audit scripts that
//! want structured facts about a host without a daemon.
//!
//! ## Modules
//!
//! * `config` — Configuration structures, loading, validation, and defaults.
//!   Supports TOML configuration files with validation via the `validator` crate.
//!
//! * `core` — Core runtime components:
//!   - Report-text parsers (key/value blocks, repeated records,
//!     line-shaped listings, indentation-nested reports)
//!   - Collector registry and traits
//!   - One-shot snapshot runner
//!
//! * `logger` — Centralized logging initialization using `tracing`.
//!   Supports console output in multiple formats (compact, pretty, JSON).

pub mod config;
pub mod core;
pub mod logger;
