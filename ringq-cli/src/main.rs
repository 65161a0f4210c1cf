use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use ringq_cli::{ErrorPolicy, Session, SessionConfig};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Drive a string queue from a line-oriented command script.
#[derive(Parser)]
struct Cli {
    /// TOML session config
    #[arg(short = 'c', long = "config")]
    config_path: Option<PathBuf>,
    /// Read commands from this file instead of stdin
    #[arg(short = 's', long = "script")]
    script_path: Option<PathBuf>,
    /// Initial queue capacity, overriding the config file
    #[arg(long = "capacity", allow_negative_numbers = true)]
    capacity: Option<isize>,
    /// 'abort' or 'continue', overriding the config file
    #[arg(long = "on-error")]
    on_error: Option<ErrorPolicy>,
    /// Echo each command before its output
    #[arg(long = "echo")]
    echo: bool,
    /// Print the effective config as TOML and exit
    #[arg(long = "dump-config")]
    dump_config: bool,
}

/// Command-line flags take precedence over values loaded from the config file.
fn apply_overrides(config: &mut SessionConfig, args: &Cli) {
    if let Some(capacity) = args.capacity {
        config.initial_capacity = capacity;
    }
    if let Some(on_error) = args.on_error {
        config.on_error = on_error;
    }
    config.echo_commands |= args.echo;
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let mut config = match &args.config_path {
        Some(config_path) => SessionConfig::from_toml_file(config_path)?,
        None => SessionConfig::default(),
    };
    apply_overrides(&mut config, &args);

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mut session = Session::new(config).context("invalid session config")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.script_path {
        Some(script_path) => {
            let file = File::open(script_path)
                .with_context(|| format!("error opening script file '{}'", script_path.display()))?;
            session.run(BufReader::new(file), &mut out)?
        }
        None => session.run(io::stdin().lock(), &mut out)?,
    };

    log::info!(
        "Ran {} commands with {} errors; {} elements left in queue",
        summary.commands,
        summary.errors,
        session.queue().len()
    );

    Ok(())
}
