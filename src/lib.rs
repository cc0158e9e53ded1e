//! # vosettings
//!
//! Headless model of a video player's settings dialog:
//! - named controls in a widget tree, mirrored into a setting map
//! - import and export of the accepted settings
//! - option tables mapping selector indices to option labels
//! - assembly of the `vo` option string and related playback signals
//!
//! ## Architecture
//!
//! 1. **vosettings-core** - Setting values, shared handles, event bus
//! 2. **vosettings-settings** - Controls, registry, option tables, command assembly, window
//! 3. **vosettings** - Command line front end

pub use vosettings_core::{
    event_bus, AppEvent, EventBus, EventFilter, SettingValue, SettingsEvent, UiEvent, VariantMap,
};

pub use vosettings_settings::{
    default_form, ButtonRole, CommandAssembler, ControlRegistry, Notifier, OptionTables,
    OptionTranslator, OutputSignals, PageSelection, SettingMap, SettingsWindow, TablesError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
