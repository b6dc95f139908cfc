//! # Message Relay Host
//!
//! Loads a relay device and drives it from a script of process calls.

use clap::Parser;
use relay_device::{DeviceScript, HostConfigSources, RelayDevice, RelayHost};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "mq_relayd")]
#[command(about = "Process-addressed message relay host", long_about = None)]
struct Args {
    /// Messages each endpoint queue holds before overwriting the oldest
    #[arg(short = 'n', long)]
    capacity: Option<usize>,

    /// Exclusive upper bound on message length, in bytes
    #[arg(short = 'm', long)]
    max_payload_len: Option<usize>,

    /// JSON file with `capacity` and `max_payload_len`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Script of `<pid> <command>` lines (reads stdin when omitted)
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let sources = HostConfigSources {
        config_file: args.config.as_deref(),
        capacity: args.capacity,
        max_payload_len: args.max_payload_len,
    };
    let config = sources.resolve().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Example: mq_relayd --capacity 5 --max-payload-len 250");
        process::exit(1);
    });

    let script_text = read_script(args.script.as_ref()).unwrap_or_else(|e| {
        eprintln!("Failed to read script: {}", e);
        process::exit(1);
    });
    let script = DeviceScript::from_text(&script_text).unwrap_or_else(|e| {
        eprintln!("Script error: {}", e);
        process::exit(1);
    });

    let device = RelayDevice::load(config).unwrap_or_else(|e| {
        eprintln!("Failed to load device: {}", e);
        process::exit(1);
    });

    let mut host = RelayHost::new(device);
    for line in host.run(&script) {
        println!("{}", line);
    }

    if let Err(e) = host.shutdown() {
        eprintln!("Shutdown error: {}", e);
        process::exit(1);
    }
}

fn read_script(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
