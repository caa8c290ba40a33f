//! # Zakat Widget Preview
//!
//! Renders the widget without a browser. State lives in memory, the page
//! address is simulated, and dialogs go to stderr.
//!
//! ## Usage
//! ```bash
//! # Standalone HTML page of the income tab
//! zakat-preview --set inc_gross=5000 --set inc_mand=800 > income.html
//!
//! # Results panel as JSON
//! zakat-preview --tab emas --gold-price 350 --set gold_keep=30 --format json
//!
//! # Step-by-step breakdown, then press the monthly installment button
//! zakat-preview --set inc_gross=5000 --press inc_monthly --format explain
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use tracing::warn;
use zakat_widget::prelude::*;

mod config_loader;

use config_loader::PreviewConfig;

/// Render the Zakat calculator widget for a tab and a set of field values
#[derive(Parser, Debug)]
#[command(name = "zakat-preview")]
#[command(version)]
#[command(about = "Render the Zakat calculator widget outside the browser", long_about = None)]
struct Args {
    /// Tab id: pendapatan, simpanan, emas, perniagaan, pelaburan, kwsp, fitrah or info
    #[arg(long, default_value = "pendapatan")]
    tab: String,

    /// Field value as ELEMENT_ID=VALUE, e.g. inc_gross=5000 (repeatable)
    #[arg(long = "set", value_name = "ID=VALUE")]
    values: Vec<String>,

    /// Button id to press after the values are entered, e.g. inc_copy (repeatable)
    #[arg(long = "press", value_name = "BUTTON_ID")]
    presses: Vec<String>,

    /// Gold price per gram for the nisab
    #[arg(long)]
    gold_price: Option<String>,

    /// Nisab weight in grams of gold
    #[arg(long)]
    nisab_grams: Option<String>,

    /// Fitrah rate per head
    #[arg(long)]
    fitrah_rate: Option<String>,

    /// Primary colour
    #[arg(long)]
    primary: Option<String>,

    /// Darker variant of the primary colour
    #[arg(long)]
    dark_primary: Option<String>,

    /// What to print
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Enable file logging to logs/ directory
    #[arg(long, default_value = "false")]
    log: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Standalone HTML page
    Html,
    /// Results panel and calculation trace as JSON
    Json,
    /// Results panel as a table
    Table,
    /// Step-by-step explanation of the calculation
    Explain,
}

/// Dialogs are printed; clipboard and printing do not exist here.
struct ConsoleHost;

impl Host for ConsoleHost {
    fn write_clipboard(&self, _text: &str, _notice: &CopyNotice) -> Result<ClipboardWrite, HostError> {
        Err(HostError::ClipboardUnavailable)
    }

    fn alert(&self, message: &str) {
        eprintln!("{} {}", "[dialog]".yellow().bold(), message);
    }

    fn print(&self) -> Result<(), HostError> {
        Err(HostError::PrintUnavailable)
    }
}

#[derive(Serialize)]
struct PreviewReport {
    tab: &'static str,
    nisab: Decimal,
    outputs: BTreeMap<&'static str, String>,
    details: Option<ZakatDetails>,
}

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "Element")]
    id: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let file_config = PreviewConfig::load();

    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>;
    if args.log || file_config.enable_logging.unwrap_or(false) {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        std::fs::create_dir_all("logs")?;
        let file_appender = tracing_appender::rolling::daily("logs", "zakat-preview.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        _file_guard = Some(guard);

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("zakat_widget=debug".parse()?))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();

        tracing::info!("--- Preview session started [{}] ---", chrono::Utc::now());
    } else {
        _file_guard = None;
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("zakat_widget=warn".parse()?))
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = file_config.apply(WidgetConfig::default());
    if let Some(primary) = &args.primary {
        config = config.with_primary(primary);
    }
    if let Some(dark_primary) = &args.dark_primary {
        config = config.with_dark_primary(dark_primary);
    }

    let storage = seeded_storage(&args, &config)?;
    let location = MemoryLocation::new(&format!("https://preview.invalid/zakat?{}={}", config.query_param, args.tab));
    let mut widget = ZakatWidget::new(config, storage, location);
    if widget.active_tab().id() != args.tab {
        warn!("Unknown tab {:?}, showing {}", args.tab, widget.active_tab());
    }

    for entry in &args.values {
        let Some((id, value)) = entry.split_once('=') else {
            warn!("Ignoring {:?}: expected ID=VALUE", entry);
            continue;
        };
        if widget.on_input(id.trim(), value) == Effect::None {
            warn!("Field {:?} is not on tab {}", id, widget.active_tab());
        }
    }

    let host = ConsoleHost;
    for id in &args.presses {
        match ButtonId::from_id(id) {
            Some(button) => {
                widget.update(WidgetEvent::Action(button.action()), &host);
            }
            None => warn!("Unknown button {:?}", id),
        }
    }

    let rendered = match args.format {
        OutputFormat::Html => widget.render_page(),
        OutputFormat::Json => {
            let report = PreviewReport {
                tab: widget.active_tab().id(),
                nisab: widget.nisab_amount(),
                outputs: widget.outputs().into_iter().collect(),
                details: widget.details(),
            };
            serde_json::to_string_pretty(&report)?
        }
        OutputFormat::Table => {
            let rows: Vec<OutputRow> = widget
                .outputs()
                .into_iter()
                .map(|(id, amount)| OutputRow { id, amount })
                .collect();
            format!("{}\n{}", widget.active_tab().to_string().green().bold(), Table::new(rows).with(Style::rounded()))
        }
        OutputFormat::Explain => match widget.details() {
            Some(details) => details.explain(),
            None => format!("Nisab: {}\n", CurrencyFormatter::default().format(widget.nisab_amount())),
        },
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Shared fields from the command line reach the widget the same way a
/// returning visitor's would: through the stored snapshot.
fn seeded_storage(args: &Args, config: &WidgetConfig) -> Result<MemoryStore, serde_json::Error> {
    let mut snapshot = serde_json::Map::new();
    let shared = [
        ("nisabGoldPrice", &args.gold_price),
        ("nisabGrams", &args.nisab_grams),
        ("fitrahPerHead", &args.fitrah_rate),
    ];
    for (key, value) in shared {
        if let Some(value) = value {
            snapshot.insert(key.to_string(), serde_json::Value::String(value.clone()));
        }
    }

    let storage = MemoryStore::new();
    if snapshot.is_empty() {
        return Ok(storage);
    }
    let raw = serde_json::to_string(&serde_json::Value::Object(snapshot))?;
    Ok(storage.with_item(config.storage_key.clone(), raw))
}
