mod commands;
mod config;
mod logging;

use clap::{Args, Parser, Subcommand};
use config::Config;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deskkit", about = "Small file-backed desk utilities", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ./deskkit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the JSON-backed TODO list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Replay bank transactions from a CSV file and print a statement
    Bank {
        /// Name of the account owner
        #[arg(long)]
        owner: String,

        /// Opening balance (decimal value)
        #[arg(long)]
        balance: Decimal,

        /// CSV file with type,amount,note columns
        #[arg(long)]
        from_csv: PathBuf,
    },

    /// Summarize expenses by category from a CSV file
    Expenses {
        /// CSV file with category,amount,date columns
        #[arg(long)]
        path: PathBuf,

        /// Sort method (amount_asc, amount_desc, category)
        #[arg(long, default_value = "amount_desc")]
        sort: String,

        /// Show only the top N categories
        #[arg(long)]
        top: Option<usize>,

        /// Filter criteria, e.g. "category=food"
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Args)]
struct FileArg {
    /// Path to the task file (default: todo.json, or [todo] file in config)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum TodoAction {
    /// Add a new task
    Add {
        /// Title of the task
        title: String,

        /// Comma-separated list of tags
        #[arg(long)]
        tags: Option<String>,

        /// Due date in YYYY-MM-DD format
        #[arg(long)]
        due: Option<String>,

        /// Accept a past due date without asking
        #[arg(long)]
        allow_past_due: bool,

        #[command(flatten)]
        file: FileArg,
    },
    /// List tasks with optional filtering
    List {
        /// Filter by status (open, done)
        #[arg(long)]
        status: Option<String>,

        /// Comma-separated tags; tasks with any of them are kept
        #[arg(long)]
        tags: Option<String>,

        /// Keep tasks due on or before this date (YYYY-MM-DD)
        #[arg(long)]
        due_before: Option<String>,

        /// Sort field (due, created, title)
        #[arg(long, default_value = "due")]
        sort_by: String,

        #[command(flatten)]
        file: FileArg,
    },
    /// Mark a task as completed
    Complete {
        /// ID of the task to complete
        id: u64,

        #[command(flatten)]
        file: FileArg,
    },
    /// Update a task
    Update {
        /// ID of the task to update
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New comma-separated list of tags
        #[arg(long)]
        tags: Option<String>,

        /// New due date in YYYY-MM-DD format
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// Accept a past due date without asking
        #[arg(long)]
        allow_past_due: bool,

        #[command(flatten)]
        file: FileArg,
    },
    /// Delete a task
    Delete {
        /// ID of the task to delete
        id: u64,

        #[command(flatten)]
        file: FileArg,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = Config::load(cli.config.as_deref()).and_then(|config| {
        logging::init(&config.log)?;
        run(cli.command, cli.json, &config)
    });

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, json: bool, config: &Config) -> anyhow::Result<()> {
    let task_file = |arg: FileArg| arg.file.unwrap_or_else(|| config.todo.file.clone());

    match command {
        Commands::Todo { action } => match action {
            TodoAction::Add {
                title,
                tags,
                due,
                allow_past_due,
                file,
            } => commands::todo::add(task_file(file), title, tags, due, allow_past_due, json),
            TodoAction::List {
                status,
                tags,
                due_before,
                sort_by,
                file,
            } => commands::todo::list(task_file(file), status, tags, due_before, sort_by, json),
            TodoAction::Complete { id, file } => commands::todo::complete(task_file(file), id),
            TodoAction::Update {
                id,
                title,
                tags,
                due,
                clear_due,
                allow_past_due,
                file,
            } => {
                let due = if clear_due { Some(None) } else { due.map(Some) };
                commands::todo::update(task_file(file), id, title, tags, due, allow_past_due)
            }
            TodoAction::Delete { id, file } => commands::todo::delete(task_file(file), id),
        },
        Commands::Bank {
            owner,
            balance,
            from_csv,
        } => commands::bank::run(owner, balance, from_csv),
        Commands::Expenses {
            path,
            sort,
            top,
            filter,
        } => commands::expenses::run(path, sort, top, filter),
    }
}
