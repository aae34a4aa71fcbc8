use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lessons", about = "Study slide lessons and take their quizzes", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage locations shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// SQLite database holding learner progress
    #[arg(long = "db", env = "LESSONS_DB_URL", default_value = "sqlite://lessons.sqlite3", global = true)]
    pub db_url: String,

    /// Lesson catalog (JSON)
    #[arg(long, env = "LESSONS_CATALOG", default_value = "content/lessons.json", global = true)]
    pub catalog: PathBuf,

    /// Directory holding lesson markdown
    #[arg(long, env = "LESSONS_CONTENT_DIR", default_value = "content", global = true)]
    pub content_dir: PathBuf,

    /// Storage key for the set of completed lessons
    #[arg(long, env = "LESSONS_COMPLETION_KEY", default_value = "completed_lessons", global = true)]
    pub completion_key: String,

    /// Secret that `author --key` must match
    #[arg(long, env = "LESSONS_ADMIN_SECRET", default_value = "DEFAULT_ADMIN_KEY", hide_env_values = true, global = true)]
    pub admin_secret: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List lessons with their completion marks
    List,

    /// Work through a lesson's slides and quiz
    Study {
        /// Lesson slug, e.g. web3-foundations
        slug: String,
    },

    /// Publish a new lesson from a JSON payload
    Author {
        /// Payload file: { "markdown": ..., "lesson": { ... } }
        #[arg(long, short = 'i')]
        input: PathBuf,
        /// Print the planned changes without writing
        #[arg(long)]
        dry_run: bool,
        /// Overwrite an existing markdown file
        #[arg(long, short = 'f')]
        force: bool,
        /// Admin key
        #[arg(long, env = "LESSONS_ADMIN_KEY", hide_env_values = true)]
        key: String,
    },

    /// Print a placeholder quiz for a markdown file as JSON
    GenerateQuiz {
        #[arg(long, short = 'i')]
        input: PathBuf,
    },
}
