// projlib test application -- CLI tool for exercising the Sony connector
// against a real projector over SDCP, RS-232C, or a serial-to-Ethernet
// adapter.
//
// Usage:
//   projlib-test-app list
//   projlib-test-app --host 192.168.1.40 status
//   projlib-test-app --host 192.168.1.40 --detect power on
//   projlib-test-app --protocol serial --serial-port /dev/ttyUSB0 get aspect
//   projlib-test-app --host 192.168.1.40 set "color temperature" "Custom 1"
//   projlib-test-app --host 192.168.1.40 options aspect
//   projlib-test-app --host 192.168.1.40 ir menu down down enter
//
// Set RUST_LOG=projlib_sony=trace to see the raw frames.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use projlib::sony::items::{self, Item};
use projlib::sony::models::{self, ProjectorModel};
use projlib::sony::{Protocol, Setting, SettingKind, SonyProjector, SonyProjectorBuilder};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// projlib test application -- controls a Sony projector from the command line.
#[derive(Parser)]
#[command(name = "projlib-test-app", version, about)]
struct Cli {
    /// Projector model (e.g. VPL-VW520, VW295ES, HW45ES).
    #[arg(long, default_value = "VPL-VW520")]
    model: String,

    /// Require an exact model name match.
    #[arg(long)]
    strict_model: bool,

    /// Protocol: sdcp, serial, serial-over-ip.
    #[arg(long, default_value = "sdcp", value_parser = parse_protocol)]
    protocol: Protocol,

    /// Projector or adapter host name / IP address.
    #[arg(long)]
    host: Option<String>,

    /// TCP port. Defaults to 53484 for SDCP.
    #[arg(long)]
    port: Option<u16>,

    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    #[arg(long)]
    serial_port: Option<String>,

    /// SDCP community (4 characters).
    #[arg(long, default_value = "SONY")]
    community: String,

    /// Per-command response timeout in milliseconds.
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Ask the projector for its model name and use the matching model
    /// (SDCP only).
    #[arg(long)]
    detect: bool,

    #[command(subcommand)]
    command: Command,
}

fn parse_protocol(s: &str) -> std::result::Result<Protocol, String> {
    s.parse().map_err(|e: projlib::Error| e.to_string())
}

#[derive(Subcommand)]
enum Command {
    /// List all supported projector models.
    List,

    /// Poll the projector and print power, errors, and every setting.
    Status,

    /// Power operations.
    Power {
        #[command(subcommand)]
        action: PowerAction,
    },

    /// Read a setting (e.g. aspect, contrast, "film mode").
    Get { setting: String },

    /// Write a setting. Numbers for numeric settings, on/off for switches,
    /// names for the rest (see `options`).
    Set { setting: String, value: String },

    /// Send one or more IR commands (e.g. menu, IR_DOWN, enter).
    Ir {
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// List the IR commands.
    IrList,

    /// List the values a setting accepts on the selected model.
    Options { setting: String },

    /// Print the model name reported by the projector (SDCP only).
    ModelName,
}

#[derive(Subcommand)]
enum PowerAction {
    /// Read the power status.
    Get,
    /// Turn the projector on.
    On,
    /// Turn the projector off.
    Off,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lookup_model(cli: &Cli) -> Result<ProjectorModel> {
    let model = ProjectorModel::from_name(&cli.model, cli.strict_model).with_context(|| {
        format!(
            "supported models: {}",
            models::model_names().collect::<Vec<_>>().join(", ")
        )
    })?;
    Ok(*model)
}

fn lookup_setting(name: &str) -> Result<Setting> {
    name.parse::<Setting>().with_context(|| {
        format!(
            "supported settings: {}",
            Setting::ALL.map(Setting::name).join(", ")
        )
    })
}

/// Find an IR command by catalog id, with or without the `IR_` prefix.
fn lookup_ir(name: &str) -> Result<&'static Item> {
    let id = name.trim().replace([' ', '-'], "_");
    let item = items::find(&id)
        .or_else(|| items::find(&format!("IR_{id}")))
        .with_context(|| format!("unknown IR command '{name}' (see `ir-list`)"))?;
    if !item.has_valid_ir_code() {
        bail!("'{name}' is not an IR command");
    }
    Ok(item)
}

async fn create_projector(cli: &Cli, cancel: CancellationToken) -> Result<SonyProjector> {
    let mut builder = SonyProjectorBuilder::new(lookup_model(cli)?)
        .protocol(cli.protocol)
        .community(&cli.community)
        .command_timeout(Duration::from_millis(cli.timeout_ms))
        .cancellation(cancel)
        .auto_detect_model(cli.detect);

    match cli.protocol {
        Protocol::Serial => {
            if cli.host.is_some() || cli.port.is_some() {
                bail!("--host and --port are not valid with the serial protocol");
            }
            let port = cli
                .serial_port
                .as_deref()
                .context("--serial-port is required for the serial protocol")?;
            builder = builder.serial_port(port);
        }
        Protocol::Sdcp | Protocol::SerialOverIp => {
            if cli.serial_port.is_some() {
                bail!("--serial-port is only valid with the serial protocol");
            }
            let host = cli
                .host
                .as_deref()
                .with_context(|| format!("--host is required for {}", cli.protocol))?;
            builder = builder.host(host);
            if let Some(port) = cli.port {
                builder = builder.port(port);
            }
        }
    }

    Ok(builder.build().await?)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list() -> Result<()> {
    let projectors = projlib::supported_projectors();
    let name_width = projectors
        .iter()
        .map(|p| p.model_name.len())
        .max()
        .unwrap_or(12)
        .max(12);

    println!("{:<12}  {:<name_width$}  Power", "Manufacturer", "Model");
    println!("{:<12}  {:<name_width$}  -------", "-".repeat(12), "-".repeat(name_width));
    for projector in &projectors {
        println!(
            "{:<12}  {:<name_width$}  {}",
            projector.manufacturer,
            projector.model_name,
            if projector.has_power_command { "command" } else { "IR" },
        );
    }
    println!();
    println!("{} models total.", projectors.len());
    Ok(())
}

fn cmd_ir_list() -> Result<()> {
    for item in items::ir_commands() {
        println!("{:<24}  {}", item.id, item.display_name);
    }
    Ok(())
}

async fn cmd_status(projector: &SonyProjector) -> Result<()> {
    let state = projector.refresh().await?;

    println!("Projector Status");
    println!("  Model:   {}", projector.model());
    match state.power {
        Some(power) => println!("  Power:   {power}"),
        None => println!("  Power:   unknown"),
    }
    match state.error {
        Some(error) => println!("  Errors:  {error}"),
        None => println!("  Errors:  unknown"),
    }

    if !state.is_on() {
        println!();
        println!("Settings are only read while the projector is on.");
        return Ok(());
    }

    println!();
    println!("Settings");
    for (setting, value) in &state.settings {
        let shown = value.map_or_else(|| "(read failed)".to_string(), |v| v.to_string());
        println!("  {:<20} {shown}", setting.name());
    }
    Ok(())
}

async fn cmd_power(projector: &SonyProjector, action: &PowerAction) -> Result<()> {
    match action {
        PowerAction::Get => println!("power: {}", projector.power_status().await?),
        PowerAction::On => {
            projector.power_on().await?;
            println!("power on sent");
        }
        PowerAction::Off => {
            projector.power_off().await?;
            println!("power off sent");
        }
    }
    Ok(())
}

async fn cmd_get(projector: &SonyProjector, name: &str) -> Result<()> {
    let setting = lookup_setting(name)?;
    let value = projector.get(setting).await?;
    println!("{setting}: {value}");
    Ok(())
}

async fn cmd_set(projector: &SonyProjector, name: &str, value: &str) -> Result<()> {
    let setting = lookup_setting(name)?;
    projector.set_from_str(setting, value).await?;
    println!("{setting}: set to {value}");
    Ok(())
}

async fn cmd_ir(projector: &SonyProjector, names: &[String]) -> Result<()> {
    let items = names
        .iter()
        .map(|name| lookup_ir(name))
        .collect::<Result<Vec<_>>>()?;
    projector.send_ir_batch(&items).await?;
    println!(
        "sent {}",
        items.iter().map(|item| item.id).collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

fn cmd_options(cli: &Cli, name: &str) -> Result<()> {
    let model = lookup_model(cli)?;
    let setting = lookup_setting(name)?;
    let options = model.capabilities().options(setting)?;

    match setting.kind() {
        SettingKind::Numeric if setting.is_read_only() => println!("{setting}: read-only number"),
        SettingKind::Numeric => println!("{setting}: number (0-65535)"),
        SettingKind::Switch => println!("{setting}: on, off"),
        SettingKind::Choice => {
            println!("{setting} on {}:", model.name);
            for option in options {
                println!("  {option}");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // These commands do not need a projector.
    match &cli.command {
        Command::List => return cmd_list(),
        Command::IrList => return cmd_ir_list(),
        Command::Options { setting } if !cli.detect => return cmd_options(&cli, setting),
        _ => {}
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted");
            ctrl_c.cancel();
        }
    });

    let projector = create_projector(&cli, cancel).await?;

    match &cli.command {
        Command::Status => cmd_status(&projector).await,
        Command::Power { action } => cmd_power(&projector, action).await,
        Command::Get { setting } => cmd_get(&projector, setting).await,
        Command::Set { setting, value } => cmd_set(&projector, setting, value).await,
        Command::Ir { commands } => cmd_ir(&projector, commands).await,
        Command::Options { setting } => {
            let setting = lookup_setting(setting)?;
            println!("{setting} on {}:", projector.model());
            for option in projector.available_options(setting)? {
                println!("  {option}");
            }
            Ok(())
        }
        Command::ModelName => {
            println!("{}", projector.model_name().await?);
            Ok(())
        }
        Command::List | Command::IrList => unreachable!("handled above"),
    }
}
