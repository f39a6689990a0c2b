//! Basic usage example
//!
//! Sends one customer message and prints the assistant's answer.
//!
//! The API token is read from the environment:
//! - SUVVY_API_TOKEN (required)
//! - SUVVY_API_URL (optional, defaults to https://api.suvvy.ai)
//!
//! Usage:
//!   SUVVY_API_TOKEN=your_token cargo run --example basic_usage -- customer-42 "Hello!"

use suvvy_api::{DialogueClient, Error, PredictOptions, RequestMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let unique_id = args.next().unwrap_or_else(|| "demo-dialogue".to_string());
    let text = args.next().unwrap_or_else(|| "Hello! What can you do?".to_string());

    let client = DialogueClient::builder().build()?;
    client.check_connection().await?;

    let options = PredictOptions::new().placeholder("customer_name", "Demo");
    let prediction = match client
        .predict_add_message(&unique_id, RequestMessage::text(text), &options)
        .await
    {
        Ok(prediction) => prediction,
        Err(Error::NegativeBalance { balance, .. }) => {
            anyhow::bail!("account balance is negative: {:?}", balance)
        }
        Err(e) => return Err(e.into()),
    };

    match prediction.latest_text() {
        Some(answer) => println!("Response:\n{}", answer),
        None => println!("No answer (the dialogue may be stopped)"),
    }
    println!(
        "\nUsage: {} tokens, {} billed",
        prediction.usage.token_usage.total_tokens, prediction.usage.balance_usage.total_tokens
    );

    Ok(())
}
