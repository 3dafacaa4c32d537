use chrono::Utc;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use otpass::api::{CmdMessage, Lookup, MessageLevel, OtpassApi};
use otpass::clipboard::SystemClipboard;
use otpass::config::{config_dir, OtpassConfig};
use otpass::directory;
use otpass::error::{OtpassError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if let OtpassError::Usage(message) = &e {
            usage_error(message);
        }
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

// Logs go to stderr; stdout carries only the three result lines.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,otpass=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn usage_error(message: &str) -> ! {
    let mut cmd = Cli::command();
    eprintln!("{}", cmd.render_help());
    cmd.error(ErrorKind::MissingRequiredArgument, message).exit()
}

fn run(cli: Cli) -> Result<()> {
    // Checked before stdin is touched.
    let lookup = Lookup::new(cli.provider, cli.account)?;

    let config = OtpassConfig::load(config_dir()?)?;
    let directory = directory::read_from(std::io::stdin().lock())?;

    let mut api = OtpassApi::new(directory, SystemClipboard, config.otp_settings());
    let copy = config.clipboard && !cli.no_clip;
    let result = api.lookup(&lookup, copy, Utc::now())?;

    if let Some(report) = &result.report {
        println!("{}", report);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Warning => eprintln!("{} {}", "Warning:".yellow(), message.content),
        }
    }
}
