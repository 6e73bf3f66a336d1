use chunked_base62::{Alphabet, CodecConfig, Mode};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error>;

/// Convert between bytes and chunked base62 text over stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "b62", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read bytes from stdin and print base62.
    Encode(Options),
    /// Read base62 from stdin and write the bytes.
    Decode(Options),
}

#[derive(Args, Debug)]
struct Options {
    /// Binary side is hex text.
    #[arg(long, conflicts_with = "base64")]
    hex: bool,

    /// Binary side is standard base64 text.
    #[arg(long)]
    base64: bool,

    /// lexicographic, base64 or base-n. Overrides --config.
    #[arg(long)]
    alphabet: Option<Alphabet>,

    /// chunked or aligned. Overrides --config.
    #[arg(long)]
    mode: Option<Mode>,

    /// JSON codec settings, e.g. {"alphabet": "base64"}.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// How the binary side of the conversion is read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Raw,
    Hex,
    Base64,
}

impl Options {
    fn format(&self) -> Format {
        match (self.hex, self.base64) {
            (true, _) => Format::Hex,
            (_, true) => Format::Base64,
            _ => Format::Raw,
        }
    }

    fn codec_config(&self) -> Result<CodecConfig, BoxError> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => CodecConfig::default(),
        };
        if let Some(alphabet) = self.alphabet {
            config.alphabet = alphabet;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "starting");

    match execute(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("b62: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: &Command) -> Result<(), BoxError> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let output = run(command, &input)?;
    io::stdout().write_all(&output)?;
    Ok(())
}

fn run(command: &Command, input: &[u8]) -> Result<Vec<u8>, BoxError> {
    use base64::{Engine, engine::general_purpose::STANDARD};

    match command {
        Command::Encode(opts) => {
            let codec = opts.codec_config()?.codec();
            let bytes = match opts.format() {
                Format::Raw => input.to_vec(),
                Format::Hex => hex::decode(std::str::from_utf8(input)?.trim())?,
                Format::Base64 => STANDARD.decode(std::str::from_utf8(input)?.trim())?,
            };
            let mut text = codec.encode(&bytes)?;
            text.push('\n');
            Ok(text.into_bytes())
        }
        Command::Decode(opts) => {
            let codec = opts.codec_config()?.codec();
            let bytes = codec.decode(std::str::from_utf8(input)?.trim())?;
            Ok(match opts.format() {
                Format::Raw => bytes,
                Format::Hex => format!("{}\n", hex::encode(bytes)).into_bytes(),
                Format::Base64 => format!("{}\n", STANDARD.encode(bytes)).into_bytes(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("b62").chain(args.iter().copied())).map(|cli| cli.command)
    }

    fn cmd(args: &[&str]) -> Command {
        parse(args).unwrap()
    }

    #[test]
    fn parses_flags() {
        let Command::Decode(opts) = cmd(&["decode", "--hex", "--alphabet", "b64", "--mode", "aligned"])
        else {
            panic!("expected decode");
        };
        assert_eq!(opts.format(), Format::Hex);
        let config = opts.codec_config().unwrap();
        assert_eq!(config.alphabet, Alphabet::Base64);
        assert_eq!(config.mode, Mode::Aligned);
    }

    #[test]
    fn defaults_without_flags() {
        let Command::Encode(opts) = cmd(&["encode"]) else {
            panic!("expected encode");
        };
        assert_eq!(opts.format(), Format::Raw);
        assert_eq!(opts.codec_config().unwrap(), CodecConfig::default());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["encode", "--alphabet"]).is_err());
        assert!(parse(&["encode", "--alphabet", "base58"]).is_err());
        assert!(parse(&["encode", "--mode", "packed"]).is_err());
        assert!(parse(&["encode", "--nope"]).is_err());
        assert!(parse(&["encode", "--hex", "--base64"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn hex_roundtrip_through_run() {
        let enc = run(&cmd(&["encode", "--hex"]), b"000000ff\n").unwrap();
        assert_eq!(enc, b"000047\n");

        let dec = run(&cmd(&["decode", "--hex"]), &enc).unwrap();
        assert_eq!(dec, b"000000ff\n");
    }

    #[test]
    fn raw_and_base64_formats() {
        let enc = run(&cmd(&["encode"]), b"hello").unwrap();
        assert_eq!(enc, b"7tQLFHz\n");
        assert_eq!(run(&cmd(&["decode"]), &enc).unwrap(), b"hello");
        assert_eq!(
            run(&cmd(&["decode", "--base64"]), &enc).unwrap(),
            b"aGVsbG8=\n"
        );
        assert_eq!(
            run(&cmd(&["encode", "--base64"]), b"aGVsbG8=").unwrap(),
            b"7tQLFHz\n"
        );
    }

    #[test]
    fn surfaces_codec_errors_as_display_text() {
        let err = run(&cmd(&["decode"]), b"ab-c").unwrap_err();
        assert_eq!(err.to_string(), "invalid base62 character '-' at index 2");

        let err = run(&cmd(&["encode", "--mode", "aligned"]), b"abc").unwrap_err();
        assert_eq!(err.to_string(), "input of 3 bytes is not a multiple of 4 bytes");
    }
}
