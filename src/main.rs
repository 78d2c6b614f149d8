use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use clipscout::cli::{Cli, Commands, KeysCommand};
use clipscout::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config);

    let mut app = Clipscout::connect(cli.database_url.as_deref(), true).await?;
    app.set_settings(settings);

    match cli.command {
        Commands::Keywords { script, refine } => {
            let script = read_script(script.as_deref()).await?;
            app.set_script(script);
            app.extract_keywords()?;
            if refine {
                app.refine_keywords().await?;
            }
            for keyword in app.keywords() {
                println!("{keyword}");
            }
        }
        Commands::Search {
            script,
            source,
            media,
            refine,
            atomic,
        } => {
            let script = read_script(script.as_deref()).await?;
            app.set_script(script);

            let mut settings = app.settings().clone();
            if let Some(source) = source {
                settings.source = source;
            }
            if let Some(media) = media {
                settings.media = media;
            }
            app.set_settings(settings);
            if atomic {
                app.set_failure_policy(FailurePolicy::Atomic);
            }

            app.extract_keywords()?;
            if refine {
                app.refine_keywords().await?;
            }

            let failures = app.search_media().await.context("media search failed")?;
            print_results(app.results());
            for failure in &failures {
                eprintln!("warning: sub-request failed: {failure}");
            }
        }
        Commands::Keys { command } => match command {
            KeysCommand::Set { provider, secret } => {
                if !app.set_key(&provider, &secret) {
                    anyhow::bail!(
                        "unknown provider `{provider}` (expected google, pixabay, pexels)"
                    );
                }
                app.save_keys().await?;
                println!("Saved API key for {provider}");
            }
            KeysCommand::Show => {
                for provider in ApiKeys::PROVIDERS {
                    let status = if app.state().keys.has(provider) {
                        "configured"
                    } else {
                        "not set"
                    };
                    println!("{provider}: {status}");
                }
            }
        },
        Commands::Stages => {
            for stage in STAGES {
                println!("{} ({}%): {}", stage.name, stage.progress, stage.description);
            }
        }
    }

    Ok(())
}

/// Read the script from a file, or from stdin when no path was given.
async fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading script from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading script from stdin")?;
            Ok(buffer)
        }
    }
}

fn print_results(results: &SearchResults) {
    for (keyword, items) in results.iter() {
        println!("{keyword}:");
        if items.is_empty() {
            println!("  (no hits)");
        }
        for item in items {
            println!("  [{}/{}] {} ({})", item.source, item.kind, item.title, item.url);
        }
    }
}
