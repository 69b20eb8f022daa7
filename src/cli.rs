use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Terminal client for editing expenses tracked by a remote expense service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI (the default)
    Tui,

    /// Print the expense list and exit
    List,

    /// Edit one expense by its position in the list and exit
    Edit {
        /// 0-based position of the expense in the service's list
        #[arg(short, long)]
        index: usize,

        /// New amount (non-negative number); unchanged if omitted
        #[arg(short, long)]
        amount: Option<String>,

        /// New date (YYYY-MM-DD); unchanged if omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// New category; unchanged if omitted
        #[arg(short, long)]
        category: Option<String>,
    },
}
