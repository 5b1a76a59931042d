//! Retrosheet Play Translator CLI
//!
//! Command-line interface over the retro-play-decoder library. It adds:
//! - TOML configuration and player-name tables
//! - Event-file and stdin input
//! - Parallel batch translation
//! - Text and JSON reports

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use retro_play_decoder::{EventFileParser, FielderNotation, Game, PlayDecoder, Translation};
use std::io::{self, BufRead};
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};
use report::{GameReport, Report};

/// Retro Play - Describe Retrosheet event codes in plain English
#[derive(Parser, Debug)]
#[command(name = "retro-play")]
#[command(about = "Translate Retrosheet event codes and event files", long_about = None)]
#[command(version)]
struct Args {
    /// Event codes to translate (e.g. S8/G4M.3-H)
    #[arg(value_name = "CODE")]
    codes: Vec<String>,

    /// Retrosheet event file(s) to describe (can be repeated)
    #[arg(short, long, value_name = "EVN")]
    file: Vec<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Spell out fielder chains instead of numbering them
    #[arg(long)]
    names: bool,

    /// Read one event code per line from stdin
    #[arg(long)]
    stdin: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Retro Play CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", retro_play_decoder::VERSION);

    let config = effective_config(&args)?;

    let mut codes = args.codes.clone();
    if args.stdin {
        codes.extend(read_stdin_codes()?);
    }

    if codes.is_empty() && config.input.files.is_empty() {
        println!("Retro Play - No input specified");
        println!("\nQuick Start:");
        println!("  retro-play S8 HR/F78 64(1)3/GDP");
        println!("  retro-play --file 2019ANA.EVA");
        println!("  cat codes.txt | retro-play --stdin");
        println!("\nUse --help for more options");
        return Ok(());
    }

    let players = config.player_directory();
    log::debug!("{} player name(s) configured", players.len());
    let decoder = PlayDecoder::with_config(config.translator.clone()).with_players(players);

    let translations = translate_codes(&decoder, &codes);
    let games = describe_files(&decoder, &config.input.files)?;

    let report = Report::new(translations, games);
    if !report.unrecognized.is_empty() {
        log::warn!(
            "{} distinct code(s) were not recognized",
            report.unrecognized.len()
        );
    }

    let rendered = report.render(config.output.format)?;
    match &config.output.path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Configuration file, overridden by command-line flags
fn effective_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    config.input.files.extend(args.file.iter().cloned());
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(output) = &args.output {
        config.output.path = Some(output.clone());
    }
    if args.names {
        config.translator.fielder_notation = FielderNotation::Names;
    }

    Ok(config)
}

fn read_stdin_codes() -> Result<Vec<String>> {
    let mut codes = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let code = line.trim();
        if !code.is_empty() {
            codes.push(code.to_string());
        }
    }
    log::debug!("Read {} code(s) from stdin", codes.len());
    Ok(codes)
}

/// Translate codes in parallel, keeping input order
fn translate_codes(decoder: &PlayDecoder, codes: &[String]) -> Vec<Translation> {
    codes.par_iter().map(|code| decoder.describe(code)).collect()
}

/// Read every event file, then describe each game in parallel
fn describe_files(decoder: &PlayDecoder, files: &[PathBuf]) -> Result<Vec<GameReport>> {
    let games: Vec<Game> = files
        .par_iter()
        .map(|path| {
            EventFileParser::parse(path)
                .with_context(|| format!("Failed to read event file: {:?}", path))
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    log::info!("Describing {} game(s)", games.len());

    Ok(games
        .par_iter()
        .map(|game| GameReport::new(game, decoder.describe_game(game).collect()))
        .collect())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "retro-play",
            "--names",
            "--format",
            "json",
            "--file",
            "2019ANA.EVA",
            "S8",
        ]);
        let config = effective_config(&args).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.translator.fielder_notation, FielderNotation::Names);
        assert_eq!(config.input.files, vec![PathBuf::from("2019ANA.EVA")]);
        assert_eq!(args.codes, vec!["S8".to_string()]);
    }

    #[test]
    fn test_translate_codes_keeps_order() {
        let decoder = PlayDecoder::new();
        let codes: Vec<String> = ["K", "S8", "W"].iter().map(|c| c.to_string()).collect();
        let translations = translate_codes(&decoder, &codes);
        let descriptions: Vec<&str> = translations.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["struck out", "singled to center field", "walked"]);
    }

    #[test]
    fn test_describe_files() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,G1\nplay,1,0,a,??,,K\nid,G2\nplay,1,0,b,??,,W").unwrap();

        let games = describe_files(&PlayDecoder::new(), &[file.path().to_path_buf()]).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].plays[0].description, "b walked");
    }

    #[test]
    fn test_missing_event_file_has_context() {
        let err = describe_files(&PlayDecoder::new(), &[PathBuf::from("/nonexistent.EVN")])
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read event file"));
    }
}
