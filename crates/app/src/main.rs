// CLI modules
mod args;
mod config;
mod op;
mod ops;

use args::Args;
use clap::Parser;
use ops::{Decrypt, Encrypt, Keygen, Pubkey};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Keygen, Keygen),
    (Pubkey, Pubkey),
    (Encrypt, Encrypt),
    (Decrypt, Decrypt),
}

/// Log to stderr so stdout carries only command output
fn init_tracing(log_level: &str) -> WorkerGuard {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::WARN);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    guard
}

fn main() {
    let args = Args::parse();

    let ctx = match op::OpContext::new(args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(ctx.config.log_level.as_str());
    let guard = init_tracing(log_level);
    if let Some(path) = &ctx.config_path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let code = match args.command.execute(&ctx) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // flush buffered log lines before exiting
    drop(guard);
    std::process::exit(code);
}
