//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tools::{
    analyze::attack::ShiftGenerator,
    encode::latin::NormalizedText,
    encrypt::shift::{Shift, ShiftEnc},
    random::key::random_shift,
};

use crate::{
    config::{valid_precision, valid_target, DecoderConfig, MAX_PRECISION},
    report,
};

/// Parse a shift key (0-25)
fn parse_shift(s: &str) -> Result<Shift, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    Shift::new(n).map_err(|err| err.to_string())
}

/// Parse the target score, a finite non-negative number
fn parse_target(s: &str) -> Result<f64, String> {
    let target: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if valid_target(target) {
        Ok(target)
    } else {
        Err("target must be a finite non-negative number".to_string())
    }
}

/// Parse decimal places (0-17)
fn parse_precision(s: &str) -> Result<usize, String> {
    let precision: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if valid_precision(precision) {
        Ok(precision)
    } else {
        Err(format!("precision cannot exceed {}", MAX_PRECISION))
    }
}

/// Shift Decoder - break Caesar ciphers by letter frequency analysis
#[derive(Parser, Debug)]
#[command(name = "shift_decoder")]
#[command(
    version,
    about = "Automatically decrypt Caesar (shift) ciphers using English letter frequencies",
    after_help = "\
Examples:
  shift_decoder                          Prompt for a ciphertext on stdin
  shift_decoder decode KHOOR --quiet     Decode an argument, print only the result
  shift_decoder decode KHOOR --top 3     Also list the three runner-up shifts
  shift_decoder encrypt 'attack at dawn' Encrypt with a random key"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Path to a TOML config file (default: ./shift_decoder.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Score the best shift should be closest to
    #[arg(long, global = true, value_parser = parse_target)]
    pub target: Option<f64>,

    /// Decimal places for scores and frequencies (0-17)
    #[arg(long, global = true, value_parser = parse_precision)]
    pub precision: Option<usize>,

    /// Only print the selected shift (the prompt banner still shows on a terminal)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Number of runner-up shifts to list after the result
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// List the found letters and their occurrences for every shift
    #[arg(long, global = true)]
    pub occurrences: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a ciphertext (read from stdin when omitted)
    Decode {
        /// The ciphertext
        ciphertext: Option<String>,
    },

    /// Encrypt a plaintext with a shift key
    Encrypt {
        /// The plaintext, uppercased before encryption
        plaintext: String,

        /// Shift key 0-25 (default: random 1-25)
        #[arg(long, short, value_parser = parse_shift)]
        shift: Option<Shift>,
    },
}

impl Cli {
    /// Resolve the effective config: file and environment first, flags last.
    pub fn decoder_config(&self) -> Result<DecoderConfig> {
        let mut config = DecoderConfig::load(self.config.as_deref())?;
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        if self.quiet {
            config.verbose = false;
        }
        if self.occurrences {
            config.occurrences = true;
        }
        Ok(config)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Encrypt { plaintext, shift }) => {
            let key = match shift {
                Some(key) => *key,
                None => random_shift(),
            };
            let plaintext = NormalizedText::new(plaintext);
            let mut ciphertext = String::with_capacity(plaintext.as_str().len());
            ShiftEnc::encrypt(plaintext.as_str(), key, &mut ciphertext);
            tracing::info!(key = key.get(), "encrypted plaintext");
            report::encrypted(&mut out, key, &ciphertext)?;
        }
        Some(Commands::Decode { ciphertext }) => {
            let config = cli.decoder_config()?;
            let raw = match ciphertext {
                Some(ciphertext) => ciphertext.clone(),
                None => prompt(&mut out, shows_banner(&config))?,
            };
            decode(&mut out, &raw, &config)?;
        }
        None => {
            let config = cli.decoder_config()?;
            let raw = prompt(&mut out, shows_banner(&config))?;
            decode(&mut out, &raw, &config)?;
        }
    }

    out.flush().context("failed to flush stdout")
}

/// The banner is part of the verbose report and always prompts an interactive user.
fn shows_banner(config: &DecoderConfig) -> bool {
    config.verbose || io::stdin().is_terminal()
}

/// Print the banner and read one line of ciphertext from stdin.
fn prompt(out: &mut impl Write, show_banner: bool) -> Result<String> {
    if show_banner {
        report::banner(out)?;
        out.flush()?;
    }
    read_line(io::stdin().lock())
}

fn read_line(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read ciphertext from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Normalize, generate and score all shifts, then report the best one.
pub fn decode(out: &mut impl Write, raw: &str, config: &DecoderConfig) -> Result<()> {
    let ciphertext = NormalizedText::new(raw);
    tracing::info!(len = ciphertext.len(), "decoding ciphertext");

    let candidates = ShiftGenerator::generate(&ciphertext);
    let best = candidates.best(config.target);

    report::notices(out, &ciphertext)?;
    if config.verbose {
        report::candidates(out, &candidates, config)?;
    }
    report::result(out, best, config)?;
    report::alternatives(out, &candidates, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shift() {
        assert_eq!(parse_shift("3"), Ok(Shift::new(3).unwrap()));
        assert!(parse_shift("26").unwrap_err().contains("out of range"));
        assert!(parse_shift("x").is_err());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("0.07"), Ok(0.07));
        assert!(parse_target("-1").is_err());
        assert!(parse_target("NaN").is_err());
    }

    #[test]
    fn test_read_line_strips_newline() {
        assert_eq!(read_line(&b"KHOOR\r\n"[..]).unwrap(), "KHOOR");
        assert_eq!(read_line(&b""[..]).unwrap(), "");
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision("0"), Ok(0));
        assert_eq!(parse_precision("17"), Ok(17));
        assert!(parse_precision("18").unwrap_err().contains("cannot exceed 17"));
        assert!(parse_precision("70000").is_err());
        assert!(parse_precision("-1").is_err());
    }

    #[test]
    fn test_out_of_range_precision_flag_is_rejected() {
        let parsed = Cli::try_parse_from(["shift_decoder", "decode", "KHOOR", "--precision", "70000"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::parse_from([
            "shift_decoder",
            "decode",
            "KHOOR",
            "--config",
            "/nonexistent/shift_decoder.toml",
        ]);
        assert!(cli.decoder_config().is_err());
    }

    #[test]
    fn test_global_flags_without_subcommand() {
        let cli = Cli::parse_from(["shift_decoder", "--quiet", "--target", "0.07"]);
        assert!(cli.command.is_none());
        assert!(cli.quiet);
        assert_eq!(cli.target, Some(0.07));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "precision = 3\ntop = 1\ntarget = 0.05\noccurrences = false").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from([
            "shift_decoder",
            "decode",
            "KHOOR",
            "--config",
            path,
            "--precision",
            "5",
            "--top",
            "2",
            "--target",
            "0.07",
            "--quiet",
            "--occurrences",
        ]);
        let config = cli.decoder_config().unwrap();
        assert_eq!(config.precision, 5);
        assert_eq!(config.top, 2);
        assert_eq!(config.target, 0.07);
        assert!(!config.verbose);
        assert!(config.occurrences);
    }

    #[test]
    fn test_decode_quiet_prints_result_only() {
        let config = DecoderConfig {
            verbose: false,
            ..DecoderConfig::default()
        };
        let mut out = Vec::new();
        decode(&mut out, "khoor", &config).unwrap();
        let shown = String::from_utf8(out).unwrap();
        assert!(!shown.contains("Letter count"));
        assert!(shown.contains("Shift Number: [12]"));
    }
}
