use std::path::PathBuf;

use clap::{Args, Subcommand};
use mailroom_client::{MailroomClient, Message, MessageId, read_attachment};
use tracing::info;

use crate::OutputFormat;
use crate::commands::message::print_message;

#[derive(Args, Debug)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub command: DraftCommand,
}

#[derive(Subcommand, Debug)]
pub enum DraftCommand {
    /// Upload files as attachments of a draft, then show the refreshed draft.
    Attach {
        /// Draft message ID.
        message_id: String,
        /// Files to attach.
        files: Vec<PathBuf>,
        /// Content type applied to every file (default: application/octet-stream).
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Remove an attachment from a draft.
    Detach {
        /// Draft message ID.
        message_id: String,
        /// Temporary attachment ID reported by the server.
        temp_id: String,
    },
}

pub async fn run(
    client: &MailroomClient,
    args: &DraftArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        DraftCommand::Attach {
            message_id,
            files,
            content_type,
        } => {
            let mut attachments = Vec::with_capacity(files.len());
            for path in files {
                let attachment = read_attachment(path).await?;
                attachments.push(match content_type {
                    Some(ct) => attachment.with_content_type(ct),
                    None => attachment,
                });
            }

            let draft = Message::draft(message_id.as_str());
            let refreshed = client.upload_draft_attachments(&draft, attachments).await?;
            info!(message_id = %refreshed.message_id, "draft refreshed");
            print_message(&refreshed, format)?;
        }
        DraftCommand::Detach {
            message_id,
            temp_id,
        } => {
            client
                .delete_attachment(&MessageId::new(message_id), temp_id)
                .await?;
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({"message_id": message_id, "removed": temp_id})
                    );
                }
                OutputFormat::Text => {
                    println!("Removed attachment {temp_id} from draft {message_id}.");
                }
            }
        }
    }
    Ok(())
}
