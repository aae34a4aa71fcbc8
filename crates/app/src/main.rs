mod cli;
mod config;
mod player;
mod render;
mod telemetry;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use services::authoring::generate_quiz;
use services::{AppServices, AuthoringOptions, Clock, LessonOpen, LessonPayload};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::{AppConfig, prepare_sqlite_file};
use crate::player::{Player, render_listing};

async fn open_services(config: &AppConfig) -> Result<AppServices, Box<dyn std::error::Error>> {
    // Open + migrate SQLite at startup; core and services stay storage-agnostic.
    prepare_sqlite_file(&config.db_url)?;
    let services = AppServices::new_sqlite(
        &config.db_url,
        &config.catalog_path,
        &config.content_dir,
        Clock::system(),
        config.services.clone(),
    )
    .await?;
    Ok(services)
}

fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()).into())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::from_args(&cli.global)?;

    match cli.command {
        Commands::List => {
            let services = open_services(&config).await?;
            println!("{}", render_listing(&services.listing()));
        }
        Commands::Study { slug } => {
            let services = open_services(&config).await?;
            let lessons = services.lesson_loop();
            match lessons.open_lesson(&slug).await {
                LessonOpen::Session(mut session) => {
                    let stdin = io::stdin();
                    let stdout = io::stdout();
                    Player::new(&lessons, stdin.lock(), stdout.lock())
                        .run(&mut session)
                        .await?;
                }
                LessonOpen::Redirect(_) => {
                    eprintln!("No lesson named \"{slug}\". Available lessons:");
                }
            }
            println!("{}", render_listing(&services.listing()));
        }
        Commands::Author {
            input,
            dry_run,
            force,
            key,
        } => {
            let payload: LessonPayload = serde_json::from_str(&read_file(&input)?)?;
            let services = open_services(&config).await?;
            let report = services
                .authoring()
                .publish(&key, payload, AuthoringOptions { dry_run, force })
                .await?;

            let lesson = &report.lesson;
            let verb = if report.dry_run { "Would add" } else { "Added" };
            println!(
                "{verb} lesson {} \"{}\" ({} questions)",
                lesson.id(),
                lesson.slug(),
                lesson.question_count()
            );
            println!(
                "  markdown: {}",
                config.content_dir.join(lesson.content_path()).display()
            );
            println!("  catalog:  {}", config.catalog_path.display());
            if let Some(backup) = &report.backup {
                println!("  backup:   {backup}");
            }
            info!(lesson_id = lesson.id().value(), dry_run = report.dry_run, "author command finished");
        }
        Commands::GenerateQuiz { input } => {
            let markdown = read_file(&input)?;
            let quiz = generate_quiz(&markdown);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &quiz)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
