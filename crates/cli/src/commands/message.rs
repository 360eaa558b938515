use clap::{Args, Subcommand};
use mailroom_client::{MailroomClient, Message, MessageId};

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct MessageArgs {
    #[command(subcommand)]
    pub command: MessageCommand,
}

#[derive(Subcommand, Debug)]
pub enum MessageCommand {
    /// Get a message by ID.
    Get {
        /// Message ID.
        message_id: String,
    },
}

pub async fn run(
    client: &MailroomClient,
    args: &MessageArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        MessageCommand::Get { message_id } => {
            let message = client.get_message(&MessageId::new(message_id)).await?;
            print_message(&message, format)?;
        }
    }
    Ok(())
}

/// Print a message in the requested format.
pub fn print_message(message: &Message, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(message)?);
        }
        OutputFormat::Text => {
            println!("Message ID:  {}", message.message_id);
            if let Some(discussion_id) = &message.discussion_id {
                println!("Discussion:  {discussion_id}");
            }
            println!("Subject:     {}", message.subject.as_deref().unwrap_or("-"));
            println!("Draft:       {}", message.is_draft);
            if message.attachments.is_empty() {
                println!("Attachments: none");
            } else {
                println!("Attachments:");
                for attachment in &message.attachments {
                    println!(
                        "  - {name} | {content_type} | {size} bytes | {id}",
                        name = attachment.file_name,
                        content_type = attachment.content_type,
                        size = attachment.file_size,
                        id = attachment.temp_id.as_deref().unwrap_or("-"),
                    );
                }
            }
        }
    }
    Ok(())
}
