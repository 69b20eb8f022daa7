use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use spendlog::{
    api::{ExpenseApi, HttpExpenseClient},
    cli::{Cli, Commands},
    config::Config,
    session::EditSession,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "spendlog=info");
    }

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(config).await,
        Commands::List => {
            init_cli_logging();
            run_list(&config).await
        }
        Commands::Edit {
            index,
            amount,
            date,
            category,
        } => {
            init_cli_logging();
            run_edit(&config, index, amount, date, category).await
        }
    }
}

/// Log to both stderr and a file for the non-interactive commands
fn init_cli_logging() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "spendlog.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

/// Run the interactive TUI. Logs go to a file only so they do not interfere
/// with the display.
async fn run_tui(config: Config) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("spendlog.log")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    info!("Starting spendlog TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("spendlog TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("spendlog TUI encountered an error: {}", e);
            Err(e)
        }
    }
}

/// Print the expense list as a table
async fn run_list(config: &Config) -> Result<()> {
    let client = HttpExpenseClient::new(config)?;
    let expenses = client.fetch_expenses(&config.user_id).await?;

    if expenses.is_empty() {
        println!("No expenses recorded for user {}", config.user_id);
        return Ok(());
    }

    println!("{:>5}  {:<12} {:<24} {:>10}", "Index", "Date", "Category", "Amount");
    println!("{}", "-".repeat(56));
    for (i, expense) in expenses.iter().enumerate() {
        println!(
            "{:>5}  {:<12} {:<24} {:>10}",
            i, expense.expense_date, expense.expense_category, expense.expense_amount
        );
    }
    println!();
    println!("Total: {} expenses", expenses.len());

    Ok(())
}

/// Load one expense by index, apply the given field changes, and submit
async fn run_edit(
    config: &Config,
    index: usize,
    amount: Option<String>,
    date: Option<chrono::NaiveDate>,
    category: Option<String>,
) -> Result<()> {
    if let Some(ref amount) = amount {
        let value: f64 = amount
            .parse()
            .map_err(|_| anyhow::anyhow!("--amount must be a number, got '{}'", amount))?;
        if value < 0.0 {
            anyhow::bail!("--amount must be non-negative, got '{}'", amount);
        }
    }

    let client = HttpExpenseClient::new(config)?;

    // Bounds are checked up front so a stale index fails loudly here, unlike
    // the silent no-op the TUI form inherits from the source screen.
    let expenses = client.fetch_expenses(&config.user_id).await?;
    if index >= expenses.len() {
        anyhow::bail!(
            "index {} is out of range: {} expenses recorded",
            index,
            expenses.len()
        );
    }

    let mut session = EditSession::new();
    session
        .load(&client, &config.user_id, vec![index.to_string()])
        .await?;

    if let Some(amount) = amount {
        session.draft.amount = amount;
    }
    if let Some(date) = date {
        session.draft.date = date.format("%Y-%m-%d").to_string();
    }
    if let Some(category) = category {
        session.draft.category = category;
    }

    info!(
        "Editing expense {}: {:?} -> {:?}",
        index, session.snapshot, session.draft
    );
    session
        .submit(&client, &config.user_id, config.settle_delay())
        .await?;

    println!(
        "Updated expense {}: {} | {} | {}",
        index, session.draft.date, session.draft.category, session.draft.amount
    );

    Ok(())
}
