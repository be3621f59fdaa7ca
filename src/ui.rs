use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use lexipass::analysis::{ComplexityReport, StrengthLevel};
use lexipass::{EntropyKind, GenerationOptions};
use rpassword::read_password;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MAX_INPUT_BYTES: usize = 4096;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

impl DisplayOptions {
    pub fn detect(quiet: bool) -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
            quiet,
        }
    }
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

fn tree_glyphs(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

pub fn build_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env = env_logger::Env::default()
        .filter_or("LEXIPASS_LOG", level)
        .write_style("LEXIPASS_LOG_STYLE");

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn validate_control_characters(s: &str, input_name: &str) -> Result<String> {
    let control_chars: Vec<usize> = s
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos)
        .collect();

    if !control_chars.is_empty() {
        let term = Term::stderr();

        term.write_line(&format!(
            "WARNING: {} contains {} control character(s) at position(s): {}",
            input_name,
            control_chars.len(),
            control_chars
                .iter()
                .map(|pos| pos.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))?;
        term.write_str("Continue anyway? [y/N]: ")?;
        term.flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        let response = response.trim().to_lowercase();

        term.clear_last_lines(2)?;

        if response != "y" && response != "yes" {
            anyhow::bail!("Aborted");
        }
    }

    Ok(s.to_string())
}

fn normalize_and_validate(s: &str, input_name: &str) -> Result<String> {
    let trimmed = s.trim();
    let normalized: String = trimmed.nfc().collect();
    validate_control_characters(&normalized, input_name)
}

pub fn read_password_input(arg: Option<String>) -> Result<Zeroizing<String>> {
    let raw = match arg {
        Some(value) => Zeroizing::new(value),
        None => {
            print!("In [0]: ");
            io::stdout().flush()?;
            Zeroizing::new(read_password().context("Failed to read password")?)
        }
    };

    if raw.len() > MAX_INPUT_BYTES {
        anyhow::bail!(
            "Password too long ({} bytes, maximum is {})",
            raw.len(),
            MAX_INPUT_BYTES
        );
    }

    Ok(Zeroizing::new(normalize_and_validate(&raw, "Password")?))
}

pub fn show_progress<F, T>(options: &DisplayOptions, message: &str, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    if options.quiet {
        let start = Instant::now();
        let result = f();
        return result.map(|r| (r, start.elapsed()));
    }

    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    if options.unicode_support {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠏"]));
    } else {
        pb.set_style(style.tick_chars("-\\|/-"));
    }

    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

fn level_style(level: StrengthLevel, options: &DisplayOptions) -> Style {
    if !options.color_support {
        return Style::new();
    }

    match level {
        StrengthLevel::Weak => Style::new().red(),
        StrengthLevel::Fair | StrengthLevel::Good => Style::new().yellow(),
        StrengthLevel::Strong | StrengthLevel::Excellent => Style::new().green(),
    }
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

pub fn display_password(
    index: usize,
    password: &str,
    report: &ComplexityReport,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", password);
        return;
    }

    let style = level_style(report.level, options);
    println!(
        "Out[{}]: {}  {}",
        index,
        password,
        style.apply_to(format!("[{} {:.0}]", report.level, report.score))
    );
}

pub fn display_settings(
    generation: &GenerationOptions,
    entropy: EntropyKind,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    if options.quiet {
        return;
    }

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_glyphs(options.unicode_support);

    let secure = entropy == EntropyKind::Cryptographic;
    let random_style = if options.color_support {
        if secure {
            Style::new().green()
        } else {
            Style::new().yellow()
        }
    } else {
        Style::new()
    };

    let on_off = |flag: bool| if flag { "on" } else { "off" };

    println!();
    println!("Settings:");
    println!(
        "  {} Words      {} ({}, {})",
        branch, generation.word_count, generation.word_category, generation.locale
    );
    println!(
        "  {} Lengths    {}..={} chars",
        branch, generation.min_word_length, generation.max_word_length
    );
    println!(
        "  {} Decoration capitals {}, numbers {}, symbols {} (density {:.2})",
        branch,
        on_off(generation.include_capitals),
        on_off(generation.include_numbers),
        on_off(generation.include_specials),
        generation.character_density
    );
    println!(
        "  {} Similar    {}",
        branch,
        if generation.avoid_similar_words {
            "avoided"
        } else {
            "allowed"
        }
    );
    println!(
        "  {} Random     {} {}",
        branch,
        random_style.apply_to(format!("[{}]", if secure { check_ok } else { check_warn })),
        random_style.apply_to(if secure {
            "ChaCha20 keystream (OS seeded)"
        } else {
            "Non-cryptographic fallback"
        })
    );
    println!("  {} Time       {:.1}ms", last, elapsed.as_secs_f64() * 1000.0);
}

pub fn display_report(password: &str, report: &ComplexityReport, options: &DisplayOptions) {
    let style = level_style(report.level, options);

    if options.quiet {
        println!("{:.0} {}", report.score, report.level);
        return;
    }

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_glyphs(options.unicode_support);
    let status = if report.level >= StrengthLevel::Strong {
        check_ok
    } else {
        check_warn
    };
    let length = password.chars().count();

    println!("Stats:");
    println!(
        "  {} Entropy    {} bits",
        branch,
        style.apply_to(format!("{:.1}", report.entropy_bits))
    );
    println!(
        "  {} Length     {} {}",
        branch,
        length,
        plural(length, "char", "chars")
    );
    println!(
        "  {} Score      {}",
        if report.feedback.is_empty() { last } else { branch },
        style.apply_to(format!("{:.1} / 100", report.score))
    );

    if !report.feedback.is_empty() {
        println!("  {} Feedback", last);
        for (i, message) in report.feedback.iter().enumerate() {
            let prefix = if i == report.feedback.len() - 1 {
                last
            } else {
                branch
            };
            println!("       {} {}", prefix, message);
        }
    }

    println!(
        "\n{} Strength: {}",
        style.apply_to(format!("[{}]", status)),
        style.apply_to(report.level)
    );
}
