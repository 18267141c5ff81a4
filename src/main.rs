use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use employee_manager::{
    Config, HttpEmployeeApi, Session,
    cli::{self, RecordCommand},
    config::DEFAULT_BASE_URL,
    core::table::DEFAULT_PAGE_SIZE,
};

#[derive(Parser)]
#[command(name = "employee-manager")]
#[command(about = "Manage employee records stored behind a REST API")]
struct Cli {
    /// Base URL of the backend; `/employees` is appended
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "EMPLOYEE_API_TIMEOUT", global = true)]
    timeout_secs: Option<u64>,

    /// Rows per page when printing the table
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    page_size: usize,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop interface (default)
    Gui,
    #[command(flatten)]
    Records(RecordCommand),
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = Config::new(
        &args.base_url,
        args.timeout_secs.map(Duration::from_secs),
        args.page_size,
    )?;

    match args.command {
        None | Some(Command::Gui) => run_gui(config),
        Some(Command::Records(command)) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?
            .block_on(run_command(config, command)),
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: Config) -> anyhow::Result<()> {
    employee_manager::gui::run(config)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: Config) -> anyhow::Result<()> {
    anyhow::bail!("built without the `gui` feature; use one of the subcommands instead")
}

async fn run_command(config: Config, command: RecordCommand) -> anyhow::Result<()> {
    let api = HttpEmployeeApi::new(&config)?;
    let mut session = Session::new(config.page_size);
    cli::execute(&mut session, &api, command, |id| {
        ask(&format!("Are you sure you want to delete employee {id}?"))
    })
    .await?;
    cli::report(&session, &mut io::stdout().lock(), &mut io::stderr().lock())
}

fn ask(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
