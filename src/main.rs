// SPDX-License-Identifier: MPL-2.0
use mira_toasts::config;
use mira_toasts::notifications::{scope, Manager, Snapshot, Variant};
use mira_toasts::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
mira-toasts: show toast notifications in the terminal

USAGE:
  mira-toasts [OPTIONS] MESSAGE[:VARIANT]...

OPTIONS:
  --config-dir DIR     Read settings.toml from DIR
  --dismiss-delay MS   Override the auto-dismiss delay
  --verbose            Log toast lifecycle events
  -h, --help           Print this help

VARIANTS:
  success, error, warning, info (default)
";

struct Flags {
    config_dir: Option<PathBuf>,
    dismiss_delay_ms: Option<u64>,
    verbose: bool,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        verbose: args.contains("--verbose"),
        config_dir: args
            .opt_value_from_str("--config-dir")
            .map_err(|e| Error::Config(e.to_string()))?,
        dismiss_delay_ms: args
            .opt_value_from_str("--dismiss-delay")
            .map_err(|e| Error::Config(e.to_string()))?,
        messages: args
            .finish()
            .into_iter()
            .map(OsString::into_string)
            .collect::<std::result::Result<Vec<String>, OsString>>()
            .map_err(|arg| Error::Config(format!("argument is not valid UTF-8: {arg:?}")))?,
    };
    Ok(Some(flags))
}

/// Splits `text:variant`; a suffix that names no variant stays part of the message.
fn parse_message(arg: &str) -> (&str, Variant) {
    arg.rsplit_once(':')
        .and_then(|(message, suffix)| suffix.parse().ok().map(|variant| (message, variant)))
        .unwrap_or((arg, Variant::default()))
}

fn render(snapshot: &Snapshot) {
    if snapshot.is_empty() {
        println!("(no notifications)");
        return;
    }
    println!("--");
    for toast in snapshot.iter() {
        println!("[{:>7}] {:<10} {}", toast.variant(), toast.id(), toast.message());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(flags) = parse_flags()? else {
        print!("{HELP}");
        return Ok(());
    };
    init_tracing(flags.verbose);

    if flags.messages.is_empty() {
        print!("{HELP}");
        return Ok(());
    }

    let (mut config, warning) = config::load_with_override(flags.config_dir);
    if let Some(warning) = warning {
        tracing::warn!(%warning, "using default settings");
    }
    if let Some(ms) = flags.dismiss_delay_ms {
        config.notifications.dismiss_delay_ms = Some(ms);
    }

    let manager = Manager::from_config(&config.notifications, Handle::current());
    tracing::info!(
        delay_ms = manager.dismiss_delay().as_millis(),
        "toast manager ready"
    );
    let _scope = scope::provide(manager);

    let mut toasts = scope::subscribe()?;
    for arg in &flags.messages {
        let (message, variant) = parse_message(arg);
        scope::add_toast(message, variant)?;
    }

    render(&toasts.borrow_and_update());
    while toasts.changed().await.is_ok() {
        let snapshot = toasts.borrow_and_update().clone();
        render(&snapshot);
        if snapshot.is_empty() {
            break;
        }
    }
    Ok(())
}
