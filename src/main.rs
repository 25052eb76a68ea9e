mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use eventbook::api::HttpApi;
use eventbook::booking::{BookingView, SubmitControl};
use eventbook::config::Config;
use eventbook::gallery::GalleryLoader;
use eventbook::slider::SlideDisplay;
use eventbook::Landing;

/// Prints each displayed slide.
struct TerminalSlides;

impl SlideDisplay for TerminalSlides {
    fn render(&mut self, src: &str) {
        println!("slide: {}", src);
    }
}

#[derive(Default)]
struct TerminalBooking {
    location: Option<String>,
}

impl BookingView for TerminalBooking {
    fn render(&mut self, control: SubmitControl) {
        debug!(enabled = control.enabled, label = control.label, "submit control");
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn navigate(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base) = cli.api_base { config.api_base = Some(base); }
    if let Some(host) = cli.host { config.page_host = host; }

    match cli.command {
        Commands::Config => {
            println!("api_base: {}", config.api_base()?);
            println!("page_host: {}", config.page_host);
            println!("gallery: {:?}", config.gallery);
            println!("slide_interval_ms: {}", config.slide_interval_ms);
            println!("confirmation_page: {}", config.confirmation_page);
        }
        Commands::Gallery => {
            let api = Arc::new(HttpApi::new(config.api_base()?));
            let images = GalleryLoader::from_config(api, &config).fetch().await;
            if images.is_empty() {
                println!("(empty) placeholder: {}", config.default_image);
            }
            for (i, img) in images.iter().enumerate() {
                println!("{:>3}  {}", i, img.location());
            }
        }
        Commands::Slideshow { ticks } => {
            let period = config.slide_interval();
            let landing = Landing::connect(config, TerminalSlides)?;
            let handle = landing.start().await;
            // half a period of slack so the last tick lands before we stop
            tokio::time::sleep(period * ticks + period / 2).await;
            handle.abort();
        }
        Commands::Book(args) => {
            let mut landing = Landing::connect(config, TerminalSlides)?;
            let mut view = TerminalBooking::default();
            match landing.submit_booking(&args.into(), &mut view).await {
                Ok(c) => {
                    println!("{}", view.location.unwrap_or_else(|| c.location()));
                    if let Some(url) = c.payment_url() { println!("payment: {}", url); }
                    if let Some(url) = c.invoice_url() { println!("invoice: {}", url); }
                }
                Err(e) => {
                    debug!("booking error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
