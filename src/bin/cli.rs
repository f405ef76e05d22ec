use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use sqlcompat::query::templates;
use sqlcompat::{
    ConnectionConfig, ConnectionHandle, DialectKind, IndexOutcome, QueryResult, StatementOutcome,
};

const HISTORY_FILE: &str = ".sqlc_history";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    Sqlite,
    Spatialite,
}

impl From<Backend> for DialectKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Sqlite => DialectKind::Sqlite,
            Backend::Spatialite => DialectKind::Spatialite,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "sqlc - inspect and query SQLite-family databases")]
struct Cli {
    /// Database file path (in-memory database when omitted)
    #[arg(short, long)]
    db_path: Option<PathBuf>,

    /// Backend flavour
    #[arg(short, long, value_enum, default_value_t = Backend::Sqlite)]
    backend: Backend,

    /// Open the database without write access
    #[arg(long)]
    read_only: bool,

    /// Enforce foreign key constraints
    #[arg(long)]
    foreign_keys: bool,

    /// Wait this long on a locked database before failing
    #[arg(long)]
    busy_timeout_ms: Option<u64>,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Run a query and print its rows
    Query {
        /// SQL query to execute
        sql: String,
        /// Maximum rows to print (0 for all)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a statement that changes data or schema
    Exec {
        /// SQL statement to execute
        sql: String,
    },

    /// List tables and views
    Tables {
        /// Sort by name
        #[arg(long)]
        ordered: bool,
    },

    /// Describe the columns of a table
    Columns {
        table: String,
    },

    /// List the foreign keys of a table
    ForeignKeys {
        table: String,
    },

    /// Export a query result as delimited text
    Export {
        sql: String,
        output: PathBuf,
        /// Write a header line with the column names
        #[arg(long)]
        header: bool,
        /// Field separator
        #[arg(short, long)]
        separator: Option<String>,
    },

    /// Create a single-column index
    Index {
        table: String,
        column: String,
        #[arg(long)]
        unique: bool,
    },

    /// Show database information
    Info,

    /// List the built-in query templates
    Templates,
}

impl Cli {
    fn config(&self) -> ConnectionConfig {
        ConnectionConfig {
            dialect: self.backend.into(),
            enforce_foreign_keys: self.foreign_keys,
            busy_timeout: self.busy_timeout_ms.map(Duration::from_millis),
            read_only: self.read_only,
            ..Default::default()
        }
    }
}

fn run_shell(db: &ConnectionHandle) -> Result<()> {
    println!("Welcome to sqlc. Type 'help' for assistance or 'exit' to quit.");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        match rl.readline("sqlc> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.to_lowercase().as_str() {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => print_help(),
                    "tables" => match db.introspector()?.list_tables(true) {
                        Ok(tables) => tables.iter().for_each(|t| println!("{}", t)),
                        Err(err) => println!("Error: {}", err),
                    },
                    _ => match db.executor()?.execute(line, 0) {
                        Ok(outcome) => display_outcome(&outcome),
                        Err(err) => println!("Error: {}", err),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  <sql>                         - Run any SQL statement");
    println!("  tables                        - List tables and views");
    println!("  help                          - Display this help message");
    println!("  exit                          - Exit the shell");
}

fn display_outcome(outcome: &StatementOutcome) {
    match outcome {
        StatementOutcome::Rows(result) => display_result(result),
        StatementOutcome::Updated(count) => println!("{} rows affected", count),
    }
}

fn display_result(result: &QueryResult) {
    println!("{}", result.to_string_table());
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut db = ConnectionHandle::new(cli.config());
    let existed = db
        .open(cli.db_path.as_deref())
        .context("Failed to open database")?;

    match &cli.command {
        Some(Commands::Shell) | None => {
            run_shell(&db)?;
        }
        Some(Commands::Query { sql, limit, json }) => {
            let result = db.executor()?.execute_query(sql, *limit)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display_result(&result);
            }
        }
        Some(Commands::Exec { sql }) => {
            let changed = db.executor()?.execute_raw(sql)?;
            println!("{} rows affected", changed);
        }
        Some(Commands::Tables { ordered }) => {
            for table in db.introspector()?.list_tables(*ordered)? {
                println!("{}", table);
            }
        }
        Some(Commands::Columns { table }) => {
            for column in db.introspector()?.describe_columns(table)? {
                println!(
                    "{}\t{}\t{}",
                    column.name(),
                    column.declared_type(),
                    column.primary_key_rank()
                );
            }
        }
        Some(Commands::ForeignKeys { table }) => {
            for fk in db.introspector()?.describe_foreign_keys(table)? {
                println!("{} -> {}({})", fk.from, fk.table, fk.to);
            }
        }
        Some(Commands::Export {
            sql,
            output,
            header,
            separator,
        }) => {
            let written = db
                .executor()?
                .export_csv(sql, output, *header, separator.as_deref())
                .with_context(|| format!("Failed to export to {}", output.display()))?;
            println!("Exported {} rows to {}", written, output.display());
        }
        Some(Commands::Index {
            table,
            column,
            unique,
        }) => match db.index_manager()?.create_index(table, column, *unique)? {
            IndexOutcome::Created => println!("Created index {}", sqlcompat::IndexManager::index_name(table, column)),
            IndexOutcome::AlreadyExists(warning) => println!("Warning: {}", warning),
        },
        Some(Commands::Info) => {
            let introspector = db.introspector()?;
            println!("sqlc Information:");
            match db.database_path() {
                Some(path) => println!("  Database file: {}", path.display()),
                None => println!("  Database file: (in memory)"),
            }
            println!("  Existed before open: {}", existed);
            println!("  Backend: {}", db.dialect_name());
            println!("  Version: {}", introspector.backend_info()?.join(", "));
            println!("  Tables: {}", introspector.list_tables(false)?.len());
        }
        Some(Commands::Templates) => {
            for (name, sql) in templates::templates() {
                println!("-- {}\n{}\n", name, sql);
            }
        }
    }

    db.close().context("Failed to close database")?;
    Ok(())
}
