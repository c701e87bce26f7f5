//! FX Weather CLI
//!
//! Command-line interface for the FX weather API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use weather_client::WeatherClient;
use weather_types::{ForecastReport, Locale};

#[derive(Parser)]
#[command(name = "weather")]
#[command(author, version, about = "FX weather CLI client", long_about = None)]
struct Cli {
    /// Base URL of the FX weather API
    #[arg(
        long,
        env = "FX_WEATHER_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's exchange weather for every pair
    Forecast {
        /// Language (ja, en); defaults to the server's
        #[arg(long)]
        lang: Option<String>,
        /// Print the raw JSON report
        #[arg(long)]
        json: bool,
    },
    /// Check API health
    Health,
}

fn parse_locale(s: &str) -> Result<Locale> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown language: {}. Supported: ja, en", s))
}

fn render(report: &ForecastReport) -> String {
    let mut out = String::new();
    for pair in &report.pairs {
        out.push_str(&format!(
            "{} {}\n  {}  ({})\n  {}\n\n",
            pair.icon,
            pair.label,
            pair.rate_with_unit(),
            pair.difference,
            pair.comment
        ));
    }
    out.push_str(&format!("{}: {}", report.locale.updated_label(), report.updated_at));
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = WeatherClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Forecast { lang, json } => {
            let lang = lang.as_deref().map(parse_locale).transpose()?;
            let report = client.forecast(lang).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render(&report));
            }
        }
    }

    Ok(())
}
