use mailroom_core::{Message, MessageId};
use tracing::{debug, instrument};

use crate::{Error, MailroomClient, error_from_response};

impl MailroomClient {
    /// Fetch a message by identifier.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), mailroom_client::Error> {
    /// use mailroom_client::{MailroomClient, MessageId};
    ///
    /// let client = MailroomClient::new("http://localhost:31415/api");
    /// let message = client.get_message(&MessageId::new("draft-id")).await?;
    /// println!("subject: {:?}", message.subject);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(message_id = %message_id))]
    pub async fn get_message(&self, message_id: &MessageId) -> Result<Message, Error> {
        let url = self.message_url(message_id);
        debug!("fetching message");

        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<Message>()
                .await
                .map_err(|e| Error::Deserialization(e.to_string()))
        } else {
            Err(error_from_response(response, &format!("message {message_id}")).await)
        }
    }
}
