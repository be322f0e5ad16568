//! Console front-end for the coffee machine.
//!
//! Reads one command per line from stdin:
//!
//! ```text
//! power | espresso | latte | select <drink> | coin <amount> | refill | status | quit
//! ```
//!
//! Set `COFFEE_MACHINE_CONFIG` to a JSON file to override the defaults and
//! `RUST_LOG` to control log output.

use anyhow::{Context, Result};
use coffee_machine::config::MachineConfig;
use coffee_machine::core::Drink;
use coffee_machine::machine::{EventOutcome, MachineEvent};
use coffee_machine::runtime::MachineRuntime;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_ENV: &str = "COFFEE_MACHINE_CONFIG";

enum Input {
    Event(MachineEvent),
    Status,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();
    let argument = words.next();

    let input = match (command.as_str(), argument) {
        ("power", _) => Input::Event(MachineEvent::PowerToggle),
        ("refill", _) => Input::Event(MachineEvent::Refill),
        ("coin" | "insert", Some(amount)) => {
            Input::Event(MachineEvent::InsertCoin(amount.to_string()))
        }
        // Empty entry still reaches the machine, which rejects it as invalid input.
        ("coin" | "insert", None) => Input::Event(MachineEvent::InsertCoin(String::new())),
        // Unknown names go to the machine so the user sees why they failed.
        ("select", Some(name)) => Input::Event(MachineEvent::SelectDrinkNamed(name.to_string())),
        ("status", _) => Input::Status,
        ("quit" | "exit", _) => Input::Quit,
        (name, None) => select(name),
        _ => Input::Help,
    };
    Some(input)
}

fn select(name: &str) -> Input {
    match name.parse::<Drink>() {
        Ok(drink) => Input::Event(MachineEvent::SelectDrink(drink)),
        Err(_) => Input::Help,
    }
}

fn render(outcome: &EventOutcome) {
    if let Some(message) = &outcome.message {
        println!("[{}] {}", outcome.state, message);
    }
    if let Some(notification) = &outcome.notification {
        println!("  >> {notification}");
    }
}

fn load_config() -> Result<MachineConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => MachineConfig::from_path(&path)
            .with_context(|| format!("failed to load configuration from {path}")),
        Err(_) => Ok(MachineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,coffee_machine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config()?;
    let (handle, task) = MachineRuntime::spawn(config);

    let mut resets = handle.subscribe();
    tokio::spawn(async move {
        loop {
            match resets.recv().await {
                Ok(outcome) => render(&outcome),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("Press Power to Start");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_input(&line) {
            None => continue,
            Some(Input::Event(event)) => render(&handle.send(event).await?),
            Some(Input::Status) => {
                let snapshot = handle.snapshot().await?;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            Some(Input::Quit) => break,
            Some(Input::Help) => {
                println!(
                    "commands: power | espresso | latte | select <drink> | coin <amount> | refill \
                     | status | quit"
                )
            }
        }
    }

    handle.shutdown().await?;
    task.await.context("machine runtime panicked")?;
    Ok(())
}
