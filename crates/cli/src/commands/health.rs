use mailroom_client::MailroomClient;

pub async fn run(client: &MailroomClient) -> anyhow::Result<()> {
    match client.health().await {
        Ok(true) => {
            println!("Mailroom API is healthy.");
            Ok(())
        }
        Ok(false) => {
            eprintln!("Mailroom API returned unhealthy status.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to reach API: {e}");
            std::process::exit(1);
        }
    }
}
