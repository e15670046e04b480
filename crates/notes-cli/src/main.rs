//! Notes CLI - capture, list, and edit notes against a running notes API.

mod cli;
mod commands;
mod error;


use std::time::Duration;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::edit::EditFields;
use crate::commands::{
    connect, run_capture, run_categories, run_delete, run_edit, run_list, run_set_category,
    run_show,
};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notes_cli=warn".parse().expect("valid directive"))
                .add_directive("notes_client=warn".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Quick capture mode: notes "my thought"
        if cli.note.is_empty() {
            Cli::command().print_help()?;
            println!();
        } else {
            let api = connect(cli.api_url.as_deref())?;
            run_capture(api, None, None, &cli.note).await?;
        }
        return Ok(());
    };

    if matches!(command, Commands::Categories) {
        run_categories();
        return Ok(());
    }

    let api = connect(cli.api_url.as_deref())?;
    match command {
        Commands::Capture {
            title,
            category,
            content,
        } => run_capture(api, title.as_deref(), category, &content).await?,
        Commands::List { category, json } => run_list(api, category, json).await?,
        Commands::Show { id, json } => run_show(api, &id, json).await?,
        Commands::Edit {
            id,
            title,
            content,
            category,
            debounce_ms,
        } => {
            run_edit(
                api,
                id.as_deref(),
                EditFields {
                    title,
                    content,
                    category,
                },
                Duration::from_millis(debounce_ms),
            )
            .await?;
        }
        Commands::SetCategory { id, category } => run_set_category(api, &id, category).await?,
        Commands::Delete { id, yes } => run_delete(api, &id, yes).await?,
        Commands::Categories => run_categories(),
    }

    Ok(())
}
