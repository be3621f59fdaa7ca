mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lexipass::history::History;
use lexipass::{Category, GenerationOptions, Locale, RandomSource};
use log::{debug, info};

#[derive(Parser)]
#[command(
    name = "lexipass",
    version,
    author,
    about = "Dictionary passphrase generator with strength scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print only the passphrase or score
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Generate new passphrases
    Generate {
        #[command(flatten)]
        options: OptionArgs,

        /// Number of passphrases to generate
        #[arg(short = 'n', long, default_value_t = 1,
              value_parser = clap::value_parser!(u16).range(1..=lexipass::history::DEFAULT_CAPACITY as i64))]
        count: u16,

        /// Print the generated history as JSON
        #[arg(long)]
        json: bool,

        /// Refuse to run without a cryptographic random source
        #[arg(long)]
        strict: bool,
    },

    /// Re-decorate an existing passphrase, keeping its words
    Rederive {
        /// Existing passphrase; prompted for when omitted
        password: Option<String>,

        #[command(flatten)]
        options: OptionArgs,

        /// Refuse to run without a cryptographic random source
        #[arg(long)]
        strict: bool,
    },

    /// Score a password
    Score {
        /// Password to score; prompted for when omitted
        password: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Number of words (2-6)
    #[arg(short, long, default_value_t = 4)]
    words: usize,

    #[arg(short, long, value_enum, default_value = "mixed")]
    category: CategoryArg,

    #[arg(short, long, value_enum, default_value = "en")]
    locale: LocaleArg,

    /// Shortest allowed word (4-15)
    #[arg(long, default_value_t = 4)]
    min_length: usize,

    /// Longest allowed word (4-15)
    #[arg(long, default_value_t = 10)]
    max_length: usize,

    /// Fraction of words that receive a digit or symbol (0.2-1.0)
    #[arg(short, long, default_value_t = 0.5)]
    density: f64,

    #[arg(long)]
    no_capitals: bool,

    #[arg(long)]
    no_numbers: bool,

    #[arg(long)]
    no_symbols: bool,

    /// Allow words that share a prefix and length
    #[arg(long)]
    allow_similar: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum CategoryArg {
    Mixed,
    Common,
    Nature,
    Technology,
    Abstract,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum LocaleArg {
    En,
    Es,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Mixed => Category::Mixed,
            CategoryArg::Common => Category::Common,
            CategoryArg::Nature => Category::Nature,
            CategoryArg::Technology => Category::Technology,
            CategoryArg::Abstract => Category::Abstract,
        }
    }
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::English,
            LocaleArg::Es => Locale::Spanish,
        }
    }
}

impl From<&OptionArgs> for GenerationOptions {
    fn from(args: &OptionArgs) -> Self {
        Self {
            word_count: args.words,
            include_capitals: !args.no_capitals,
            include_numbers: !args.no_numbers,
            include_specials: !args.no_symbols,
            word_category: args.category.into(),
            locale: args.locale.into(),
            min_word_length: args.min_length,
            max_word_length: args.max_length,
            character_density: args.density,
            avoid_similar_words: !args.allow_similar,
        }
    }
}

fn random_source(strict: bool) -> Result<RandomSource> {
    let rng = RandomSource::from_entropy();
    debug!("Random source: {:?}", rng.entropy_kind());

    if strict {
        rng.require_cryptographic()
            .context("Refusing to continue in strict mode")?;
    }

    Ok(rng)
}

fn run_generate(
    options: GenerationOptions,
    count: u16,
    json: bool,
    strict: bool,
    display: &ui::DisplayOptions,
) -> Result<()> {
    options.validate().context("Invalid generation options")?;
    let mut rng = random_source(strict)?;
    let mut history = History::default();

    let (_, elapsed) = ui::show_progress(display, "Generating...", || {
        for _ in 0..count {
            let password = lexipass::generate_with(&options, &mut rng)
                .context("Failed to generate passphrase")?;
            history.record(&password, options);
        }
        Ok(())
    })?;
    info!("Generated {} passphrase(s)", history.len());

    if json {
        println!("{}", history.to_json()?);
        return Ok(());
    }

    let entries: Vec<_> = history.entries().collect();
    for (index, entry) in entries.iter().rev().enumerate() {
        let report = lexipass::score(&entry.password);
        ui::display_password(index, &entry.password, &report, display);
    }

    if let Some(latest) = history.latest() {
        if count == 1 && !display.quiet {
            println!();
            ui::display_report(&latest.password, &lexipass::score(&latest.password), display);
        }
    }

    ui::display_settings(&options, rng.entropy_kind(), elapsed, display);

    Ok(())
}

fn run_rederive(
    password: Option<String>,
    options: GenerationOptions,
    strict: bool,
    display: &ui::DisplayOptions,
) -> Result<()> {
    options.validate().context("Invalid generation options")?;
    let existing = ui::read_password_input(password)?;
    let mut rng = random_source(strict)?;

    let (password, elapsed) = ui::show_progress(display, "Re-deriving...", || {
        lexipass::rederive_with(&existing, &options, &mut rng)
            .context("Failed to re-derive passphrase")
    })?;

    let report = lexipass::score(&password);
    ui::display_password(0, &password, &report, display);
    if !display.quiet {
        println!();
        ui::display_report(&password, &report, display);
    }
    ui::display_settings(&options, rng.entropy_kind(), elapsed, display);

    Ok(())
}

fn run_score(password: Option<String>, json: bool, display: &ui::DisplayOptions) -> Result<()> {
    let password = ui::read_password_input(password)?;
    let report = lexipass::score(&password);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::display_report(&password, &report, display);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ui::build_logger(cli.verbose);

    let display = ui::DisplayOptions::detect(cli.quiet);

    match cli.command {
        Command::Generate {
            options,
            count,
            json,
            strict,
        } => run_generate((&options).into(), count, json, strict, &display),
        Command::Rederive {
            password,
            options,
            strict,
        } => run_rederive(password, (&options).into(), strict, &display),
        Command::Score { password, json } => run_score(password, json, &display),
    }
}
