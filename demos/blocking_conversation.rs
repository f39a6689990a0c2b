//! Blocking client example
//!
//! Shows the dialogue history, adds an employee note, asks for a prediction
//! and finally resets the dialogue.
//!
//! Usage:
//!   SUVVY_API_TOKEN=your_token cargo run --example blocking_conversation -- customer-42

use suvvy_api::blocking::DialogueClient;
use suvvy_api::{PredictOptions, RequestMessage};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let unique_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demo-dialogue".to_string());

    let client = DialogueClient::builder().build_blocking()?;
    let conversation = client.conversation(unique_id);

    match conversation.get() {
        Ok(dialogue) => {
            println!("{} messages so far, active: {}", dialogue.messages.len(), dialogue.is_active());
            for message in &dialogue.messages {
                println!("  [{}] {}", message.sender, message.text().unwrap_or("<non-text>"));
            }
        }
        Err(e) if e.kind() == suvvy_api::ErrorKind::DialogueNotFound => {
            println!("New dialogue");
        }
        Err(e) => return Err(e.into()),
    }

    let added = conversation.add_messages(RequestMessage::employee("Customer asked about delivery."))?;
    println!("Added {} message(s), {} tokens", added.added_messages.len(), added.used_tokens);

    let prediction = conversation.predict(&PredictOptions::new())?;
    println!("Answer: {}", prediction.latest_text().unwrap_or("<none>"));

    if let Some(previous) = conversation.reset()? {
        println!("Reset dialogue {} ({} messages)", previous.id, previous.messages.len());
    }

    Ok(())
}
