use anyhow::{Context, Result};
use clap::Parser;
use hexcalc::calculator::copy_to_clipboard;
use hexcalc::keys::{KeyCode, ScriptSource, parse_keys};
use hexcalc::{Config, Display, KeySource};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Bit-manipulation calculator driven by key names.
///
/// Keys are whitespace separated names such as `1 F + 2 =`, `rol`, `bflip`,
/// `rgb888` or `alt clr`. Without KEYS, key names are read from stdin.
#[derive(Parser, Debug)]
#[command(name = "hexcalc", version)]
struct Cli {
    /// Keys to press, in order.
    keys: Vec<String>,

    /// Config file (defaults to $XDG_CONFIG_HOME/hexcalc/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON object per key.
    #[arg(long)]
    json: bool,

    /// Print only the final display.
    #[arg(long, short)]
    quiet: bool,

    /// Copy the final value to the clipboard.
    #[arg(long)]
    copy: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let mut calc = config.build_calculator();

    let mut source: Box<dyn KeySource> = if cli.keys.is_empty() {
        Box::new(spawn_stdin_reader())
    } else {
        Box::new(ScriptSource::new(parse_keys(&cli.keys.join(" "))?))
    };

    let mut last = calc.display();
    calc.run(&mut source, |key, display| {
        if !cli.quiet {
            print_display(key, display, cli.json);
        }
        last = display.clone();
    });

    if cli.quiet {
        print_final(&last, cli.json)?;
    }
    if cli.copy {
        copy_to_clipboard(&last.raw)?;
    }

    Ok(())
}

/// Read key names from stdin on a separate thread.
///
/// Lines that fail to parse are skipped with a warning.
fn spawn_stdin_reader() -> flume::Receiver<KeyCode> {
    let (tx, rx) = flume::unbounded();

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_keys(&line) {
                Ok(keys) => {
                    for key in keys {
                        if tx.send(key).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => warn!(%err, line = %line, "skipping input line"),
            }
        }
    });

    rx
}

fn print_display(key: KeyCode, display: &Display, json: bool) {
    if json {
        match serde_json::to_string(display) {
            Ok(line) => println!("{}", line),
            Err(err) => warn!(%err, "failed to encode display"),
        }
    } else {
        println!("{:>8}  {}", key.name(), display);
    }
}

fn print_final(display: &Display, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(display).context("Failed to encode display")?;
        println!("{}", line);
    } else {
        println!("{}", display);
    }
    Ok(())
}
