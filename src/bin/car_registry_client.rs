//! Command-line client for a running car registry server.
//!
//! Wraps [`car_registry::client::RegistryClient`] so cars can be registered and looked up from a
//! shell. Exit status is non-zero on conflicts, rejected requests, and transport failures.
use anyhow::{Context, Result, bail};
use car_registry::client::{LookupOutcome, RegisterOutcome, RegistryClient};
use car_registry::registry::Record;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "car-registry-client",
    about = "Register and look up cars on a car registry server"
)]
struct Cli {
    /// Base URL of the registry server.
    #[arg(
        long,
        env = "CAR_REGISTRY_URL",
        default_value = "http://127.0.0.1:8080",
        global = true
    )]
    url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a car.
    Register {
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Look up a car by make and/or model.
    Lookup {
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the server's counters.
    Metrics,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let client = RegistryClient::new(&cli.url).context("failed to build registry client")?;

    match cli.command {
        Command::Register { make, model } => {
            match client.register(&Record::new(make, model)).await? {
                RegisterOutcome::Created(stored) => print_json(&stored),
                RegisterOutcome::Acknowledged => {
                    println!("registered");
                    Ok(())
                }
                RegisterOutcome::Conflict => bail!("a car with this make and model already exists"),
            }
        }
        Command::Lookup { make, model } => {
            match client.lookup(make.as_deref(), model.as_deref()).await? {
                LookupOutcome::Found(record) => print_json(&record),
                LookupOutcome::NoContent => {
                    println!("no matching car");
                    Ok(())
                }
            }
        }
        Command::Metrics => print_json(&client.metrics().await?),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render response")?;
    println!("{rendered}");
    Ok(())
}
