use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;

use vosettings::{
    event_bus, init_logging, ButtonRole, EventFilter, Notifier, OptionTables, SettingsWindow,
    VariantMap, BUILD_DATE, VERSION,
};

#[derive(Parser)]
#[command(name = "vosettings")]
#[command(about = "Apply video player settings and print the resulting vo options")]
#[command(version)]
struct Cli {
    /// Option tables merged over the built-in ones (.json or .toml).
    /// Defaults to the user override file when present.
    #[arg(long, value_name = "FILE")]
    tables: Option<PathBuf>,

    /// Stored settings to import before applying (JSON object)
    #[arg(long, value_name = "FILE")]
    payload: Option<PathBuf>,

    /// Print the accepted settings as JSON
    #[arg(long)]
    dump_settings: bool,

    /// Write the option tables in effect to FILE and exit
    #[arg(long, value_name = "FILE")]
    export_tables: Option<PathBuf>,
}

fn load_tables(path: Option<&Path>) -> anyhow::Result<OptionTables> {
    match path {
        Some(path) => {
            let mut tables = OptionTables::builtin();
            let overrides = OptionTables::load_from_file(path)
                .with_context(|| format!("Failed to load option tables from {}", path.display()))?;
            tables.merge(&overrides);
            Ok(tables)
        }
        None => OptionTables::load_with_user_overrides().context("Failed to load option tables"),
    }
}

fn load_payload(path: &Path) -> anyhow::Result<VariantMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::debug!("vosettings {} (built {})", VERSION, BUILD_DATE);

    let tables = load_tables(cli.tables.as_deref())?;
    if let Some(path) = &cli.export_tables {
        tables
            .save_to_file(path)
            .with_context(|| format!("Failed to write option tables to {}", path.display()))?;
        println!("Wrote {} option tables to {}", tables.len(), path.display());
        return Ok(());
    }

    event_bus().subscribe(EventFilter::All, |event| {
        tracing::info!("Event: {}", event.description());
    });

    let mut window = SettingsWindow::with_default_form(Rc::new(tables), Notifier::global());
    if let Some(path) = &cli.payload {
        let payload = load_payload(path)?;
        let applied = window.take_settings(&payload);
        tracing::info!("Imported {} of {} settings", applied, payload.len());
    }

    window.on_button_clicked(ButtonRole::Apply);
    let signals = window.signals();

    println!("vo-cmdline: {}", signals.vo_command_line);
    println!("framedrop: {}", signals.framedrop_mode);
    println!("vd-lavc-framedrop: {}", signals.decoder_drop_mode);
    println!("video-sync: {}", signals.display_sync_mode);
    println!("audio-drop-size: {}", signals.audio_drop_size);
    println!("video-sync-max-audio-change: {}", signals.maximum_audio_change);
    println!("video-sync-max-video-change: {}", signals.maximum_video_change);
    println!("sub-gray: {}", signals.subs_are_gray);

    if cli.dump_settings {
        let json = serde_json::to_string_pretty(&window.accepted().export())
            .context("Failed to serialize settings")?;
        println!("{}", json);
    }

    Ok(())
}
