use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use rpassword::read_password;
use sitepass::{Argon2Config, StrengthAssessment, StrengthLabel, estimate_strength};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

/// Labels at or above this are shown as safe.
pub const MIN_SAFE_LABEL: StrengthLabel = StrengthLabel::Good;

const SCORE_CELLS: usize = 8;

pub enum PasswordSource {
    Derived(Argon2Config),
    Random,
}

pub struct OutputConfig {
    pub source: PasswordSource,
    pub length: usize,
    pub charset_size: usize,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

/// Reads the master password without echo. Only emptiness is checked; the
/// value itself is passed on untouched.
pub fn prompt_master_secret() -> Result<Zeroizing<String>> {
    print!("Master: ");
    io::stdout().flush()?;

    let master = Zeroizing::new(read_password().context("Failed to read master password")?);
    validate_required(&master, "Master password")?;

    Ok(master)
}

pub fn prompt_domain() -> Result<String> {
    print!("Domain: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read domain")?;
    validate_required(&input, "Domain")?;

    Ok(input)
}

fn validate_required(value: &str, input_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{} cannot be empty", input_name);
    }
    Ok(())
}

pub fn show_progress<F, T>(options: &DisplayOptions, message: &'static str, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    if options.quiet {
        let start = Instant::now();
        return f().map(|r| (r, start.elapsed()));
    }

    println!();

    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    if options.unicode_support {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏⠿"));
    } else {
        pb.set_style(style.tick_chars("-\\|/-"));
    }

    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

pub fn display_output(
    output: &Zeroizing<String>,
    config: &OutputConfig,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**output);
        return;
    }

    println!("Out:\n{}\n", &**output);

    let assessment = estimate_strength(output);
    display_settings(config);
    display_stats(&assessment, output.chars().count(), elapsed, options);
}

fn display_settings(config: &OutputConfig) {
    println!("Settings:");

    match &config.source {
        PasswordSource::Derived(kdf_config) => {
            println!(
                "  ├─ KDF        Argon2id (m={} MiB, t={}, p={})",
                kdf_config.memory_mib(),
                kdf_config.iterations,
                kdf_config.parallelism
            );
            println!("  ├─ Salt       SHA-256(domain)");
            println!("  ├─ Mapping    Byte mod {}", config.charset_size);
        }
        PasswordSource::Random => {
            println!("  ├─ Source     OS CSPRNG + ChaCha20");
            println!("  ├─ Policy     Upper, lower, digit, special guaranteed");
            println!("  ├─ Shuffle    Fisher-Yates");
        }
    }

    println!("  ├─ Charset    {} chars", config.charset_size);
    println!("  └─ Output     {}", char_count(config.length));

    println!();
}

fn display_stats(
    assessment: &StrengthAssessment,
    length: usize,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);

    let secure = assessment.label >= MIN_SAFE_LABEL;
    let status_icon = if secure { check_ok } else { check_warn };
    let style = if !options.color_support {
        Style::new()
    } else if secure {
        Style::new().green()
    } else {
        Style::new().yellow()
    };

    println!("Stats:");

    println!(
        "  ├─ Entropy    {} {} bits ({})",
        style.apply_to(format!("[{}]", status_icon)),
        style.apply_to(assessment.entropy_bits),
        style.apply_to(assessment.label)
    );

    println!(
        "  ├─ Score      {} {}/{}",
        style.apply_to(score_bar(assessment.score, options.unicode_support)),
        assessment.score,
        SCORE_CELLS
    );

    println!("  ├─ Length     {}", char_count(length));

    println!("  └─ Time       {:.1}s", elapsed.as_secs_f64());

    println!(
        "\n{} Strength: {}",
        style.apply_to(format!("[{}]", status_icon)),
        style.apply_to(assessment.label)
    );
}

fn char_count(length: usize) -> String {
    format!("{length} chars")
}

fn score_bar(score: u8, unicode_support: bool) -> String {
    let (full, empty) = if unicode_support { ('█', '░') } else { ('#', '-') };
    let filled = usize::from(score).min(SCORE_CELLS);

    let mut bar = String::with_capacity(SCORE_CELLS * 3 + 2);
    bar.push('[');
    bar.extend(std::iter::repeat_n(full, filled));
    bar.extend(std::iter::repeat_n(empty, SCORE_CELLS - filled));
    bar.push(']');
    bar
}
