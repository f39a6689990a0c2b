//! Multimodal messages example
//!
//! Downloads an image, sends it together with a question and prints the
//! tool calls or text the assistant produced.
//!
//! Usage:
//!   SUVVY_API_TOKEN=your_token cargo run --example multimodal_messages -- https://example.com/cat.png

use std::time::Duration;

use suvvy_api::transport::HttpTransport;
use suvvy_api::{Base64File, DialogueClient, MessageContent, PredictOptions, RequestMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("pass an image URL"))?;

    let downloader = HttpTransport::new(Duration::from_secs(30))?;
    let image = Base64File::from_url(&downloader, &url).await?;
    println!("Downloaded {} bytes", image.decode().len());

    let client = DialogueClient::builder().build()?;
    let conversation = client.conversation("multimodal-demo");
    let prediction = conversation
        .predict_add_message(
            vec![
                RequestMessage::customer(MessageContent::image(image)),
                RequestMessage::text("What is on this picture?"),
            ],
            &PredictOptions::new(),
        )
        .await?;

    for message in &prediction.new_messages {
        match &message.content {
            MessageContent::Text(text) => println!("[{}] {}", message.sender, text),
            MessageContent::ToolCalls(calls) => {
                for call in &calls.tool_calls {
                    println!("tool call {} -> {}({:?})", call.id, call.function_name(), call.arguments());
                }
            }
            other => println!("[{}] {} message", message.sender, other.content_type()),
        }
    }

    Ok(())
}
