use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tinylink_registry::StorageArgs;
use tinylink_telemetry::{LogFormat, LOG_FORMAT_ENV};

pub const BASE_URL_ENV: &str = "TINYLINK_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_QR_OUTPUT: &str = "qr.png";

#[derive(Debug, Parser)]
#[command(name = "tinylink", about = "Create and manage short links")]
pub struct CLI {
    /// Public prefix used to print short URLs.
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL.
    Shorten {
        url: String,
        /// Use this code instead of a generated one.
        #[arg(short, long)]
        code: Option<String>,
    },
    /// List every short link, newest first.
    List,
    /// Show the details of one short link.
    Get { code: String },
    /// Delete a short link.
    Delete { code: String },
    /// Save a QR code of a short URL as a PNG file.
    Qr {
        code: String,
        #[arg(short, long, default_value = DEFAULT_QR_OUTPUT)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorten_with_custom_code() {
        let cli = CLI::try_parse_from(["tinylink", "shorten", "example.com", "-c", "promo"]).unwrap();
        match cli.command {
            Command::Shorten { url, code } => {
                assert_eq!(url, "example.com");
                assert_eq!(code.as_deref(), Some("promo"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = CLI::try_parse_from([
            "tinylink",
            "list",
            "--base-url",
            "https://tiny.link",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "https://tiny.link");
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn qr_output_defaults_to_png_file() {
        let cli = CLI::try_parse_from(["tinylink", "qr", "abc123"]).unwrap();
        match cli.command {
            Command::Qr { code, output } => {
                assert_eq!(code, "abc123");
                assert_eq!(output, PathBuf::from(DEFAULT_QR_OUTPUT));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = CLI::try_parse_from(["tinylink", "qr", "abc123", "-o", "promo.png"]).unwrap();
        assert!(matches!(cli.command, Command::Qr { output, .. } if output == PathBuf::from("promo.png")));
    }

    #[test]
    fn get_requires_code() {
        assert!(CLI::try_parse_from(["tinylink", "get"]).is_err());
    }
}
