mod cli;

use crate::cli::{Command, CLI};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tinylink_registry::{
    open_registry, render_png, QrError, Registry, RegistryError, ShortCode, ShortLink,
    ShortenParams, DEFAULT_QR_SIZE,
};
use tinylink_telemetry::DEFAULT_FILTER;

const RULE: &str = "------------------------------------------------------------";

#[tokio::main]
async fn main() -> ExitCode {
    let config = CLI::parse();

    if let Err(err) = tinylink_telemetry::init(config.log_format, DEFAULT_FILTER) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let result = match open_registry(&config.storage).await {
        Ok(registry) => run(registry, config.command, &config.base_url).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Qr(#[from] QrError),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn exit_code(err: &CliError) -> u8 {
    match err {
        CliError::Registry(RegistryError::InvalidInput(_)) => 2,
        CliError::Registry(RegistryError::NotFound(_)) => 3,
        CliError::Registry(RegistryError::CodeConflict(_)) => 4,
        CliError::Registry(_) | CliError::Qr(_) | CliError::Write { .. } => 1,
    }
}

async fn run(registry: Arc<dyn Registry>, command: Command, base_url: &str) -> Result<(), CliError> {
    match command {
        Command::Shorten { url, code } => {
            let mut params = ShortenParams::new(url);
            params.custom_code = code;
            let link = registry.shorten(params).await?;
            println!("Short URL: {}", link.code.to_url(base_url));
        }
        Command::List => print_links(&registry.list().await?),
        Command::Get { code } => {
            let link = find(registry.as_ref(), code).await?;
            print_link(&link, base_url);
        }
        Command::Delete { code } => {
            let code = ShortCode::new(code)?;
            if registry.delete(&code).await? {
                println!("Deleted {code}");
            } else {
                println!("Nothing to delete for {code}");
            }
        }
        Command::Qr { code, output } => {
            let link = find(registry.as_ref(), code).await?;
            let png = render_png(&link.code.to_url(base_url), DEFAULT_QR_SIZE)?;
            tokio::fs::write(&output, png)
                .await
                .map_err(|source| CliError::Write {
                    path: output.clone(),
                    source,
                })?;
            println!("QR code saved to {}", output.display());
        }
    }

    Ok(())
}

async fn find(registry: &dyn Registry, code: String) -> Result<ShortLink, RegistryError> {
    let code = ShortCode::new(code)?;
    registry
        .resolve(&code)
        .await?
        .ok_or_else(|| RegistryError::NotFound(code.to_string()))
}

fn print_links(links: &[ShortLink]) {
    if links.is_empty() {
        println!("No short links found");
        return;
    }

    println!("{RULE}");
    println!("{:<10} {:<15} {:<30} Clicks", "ID", "Code", "Created");
    println!("{RULE}");
    for link in links {
        println!(
            "{:<10} {:<15} {:<30} {}",
            link.id,
            link.code.as_str(),
            link.created_at.to_string(),
            link.clicks
        );
    }
    println!("{RULE}");
}

fn print_link(link: &ShortLink, base_url: &str) {
    println!("ID:         {}", link.id);
    println!("Code:       {}", link.code);
    println!("Short URL:  {}", link.code.to_url(base_url));
    println!("Target:     {}", link.target);
    println!("Created:    {}", link.created_at);
    println!("Clicks:     {}", link.clicks);
}
