use std::io::{self, Write};
use std::path::PathBuf;
use std::{fs, process};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use flatini::{Limits, PropertyTable, SerializeOptions};
use log::{LevelFilter, Log, Metadata, Record};

#[derive(Parser, Debug)]
#[command(name = "flatini")]
#[command(about = "Parse an INI file and print or query its properties.", long_about = None)]
struct Cli {
    /// INI file to read.
    path: PathBuf,
    /// Repeat for more log output on stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_PROPERTIES)]
    max_properties: usize,
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_KEY_LEN)]
    max_key_len: usize,
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_VALUE_LEN)]
    max_value_len: usize,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the parsed file back out, grouped by section (the default).
    Dump {
        /// Quote values that would otherwise read back differently.
        #[arg(long, default_value_t = false)]
        quote: bool,
    },
    /// Print the value of a property.
    Get {
        section: String,
        key: String,
        /// Print every value of a repeated key, one per line.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// List section names in order of first appearance.
    Sections,
    /// List the properties of a section.
    Keys { section: String },
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::install(cli.verbose)?;

    let text = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;

    let limits = Limits::new()
        .with_max_properties(cli.max_properties)
        .with_max_key_len(cli.max_key_len)
        .with_max_value_len(cli.max_value_len);
    let table = flatini::parse_with_limits(&text, limits)
        .with_context(|| format!("failed to parse {}", cli.path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(
        cli.command.unwrap_or(Command::Dump { quote: false }),
        &table,
        &mut out,
    )?;
    out.flush()?;

    Ok(())
}

fn run(command: Command, table: &PropertyTable<'_>, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Dump { quote } => dump(table, quote, out)?,
        Command::Get { section, key, all } => {
            if !table.has_property(&section, &key) {
                bail!("no property {key:?} in section {section:?}");
            }

            let values = table.values(&section, &key).take(if all { usize::MAX } else { 1 });
            for value in values {
                writeln!(out, "{value}")?;
            }
        }
        Command::Sections => {
            for section in table.sections() {
                writeln!(out, "{section}")?;
            }
        }
        Command::Keys { section } => {
            if !table.has_section(&section) {
                bail!("no section {section:?}");
            }

            for (key, value) in table.properties(&section) {
                writeln!(out, "{key}={value}")?;
            }
        }
    }

    Ok(())
}

fn dump(table: &PropertyTable<'_>, quote: bool, out: &mut impl Write) -> io::Result<()> {
    let options = SerializeOptions {
        quote_values: quote,
    };
    let mut result = Ok(());

    table.serialize_with(options, |line| {
        if result.is_ok() {
            result = out.write_all(line.as_bytes());
        }
    });

    result
}

struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    fn install(verbose: u8) -> Result<()> {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        log::set_boxed_logger(Box::new(Self { level }))
            .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))?;
        log::set_max_level(level);

        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}
