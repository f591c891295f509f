mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sitepass::{
    Argon2Config, MAX_LENGTH, MIN_LENGTH, character_table, derive_password, generate_random,
    restricted_table,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "sitepass",
    version,
    about = "Stateless per-site passwords using Argon2id"
)]
struct Cli {
    #[arg(short, long, value_enum, default_value = "derive", env = "SITEPASS_MODE")]
    mode: Mode,

    /// Password length in characters
    #[arg(
        short,
        long,
        default_value_t = 32,
        env = "SITEPASS_LENGTH",
        value_parser = clap::value_parser!(u16).range(MIN_LENGTH as i64..=MAX_LENGTH as i64)
    )]
    length: u16,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", env = "SITEPASS_LOG")]
    log_level: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum Mode {
    /// Same master and domain always give the same password
    Derive,
    /// Fresh random password with every character class present
    Random,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };
    let length = usize::from(cli.length);

    let (output, output_config, elapsed) = match cli.mode {
        Mode::Derive => {
            let master = ui::prompt_master_secret()?;
            let domain = ui::prompt_domain()?;

            let (password, elapsed) = ui::show_progress(&options, "Deriving...", || {
                derive_password(&master, &domain, length).context("Failed to derive password")
            })?;

            let config = ui::OutputConfig {
                source: ui::PasswordSource::Derived(Argon2Config::STANDARD),
                length,
                charset_size: character_table().len(),
            };
            (password, config, elapsed)
        }
        Mode::Random => {
            let (password, elapsed) = ui::show_progress(&options, "Generating...", || {
                generate_random(length).context("Failed to generate random password")
            })?;

            let config = ui::OutputConfig {
                source: ui::PasswordSource::Random,
                length,
                charset_size: restricted_table().len(),
            };
            (password, config, elapsed)
        }
    };

    ui::display_output(&output, &output_config, elapsed, &options);

    Ok(())
}
