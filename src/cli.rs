use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use eventbook::types::BookingForm;

/// Drive the event-booking landing page flows from a terminal
#[derive(Parser)]
#[command(name = "eventbook")]
#[command(about = "Gallery slideshow and booking submission against the event-booking backend", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user eventbook.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed API base, skipping host detection
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Host name the page is served from
    #[arg(long, global = true, value_name = "NAME")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved configuration
    Config,
    /// Load the gallery and list its images
    Gallery,
    /// Run the slider for a number of auto-advance ticks
    Slideshow {
        #[arg(short, long, default_value_t = 5)]
        ticks: u32,
    },
    /// Submit one booking
    Book(BookArgs),
}

#[derive(Args)]
pub struct BookArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub event_type: String,
    /// Passed through as typed
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub amount: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

impl From<BookArgs> for BookingForm {
    fn from(a: BookArgs) -> Self {
        BookingForm {
            name: a.name,
            phone: a.phone,
            email: a.email,
            event_type: a.event_type,
            date: a.date,
            location: a.location,
            amount: a.amount,
            message: a.message,
        }
    }
}
