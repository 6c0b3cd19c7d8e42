use tokio::sync::broadcast;

/// Broadcast messages emitted by the SDK for the host application.
///
/// Messages carry no payload beyond their name; subscribers that need state should read it from
/// the client after receiving the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A login attempt completed successfully and the session is fully committed.
    LoggedIn,
}

/// Fan-out sender for [Message]. Emission is fire-and-forget: delivery is not awaited and
/// having no subscribers is not an error.
pub(crate) struct Messenger {
    tx: broadcast::Sender<Message>,
}

impl Messenger {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.tx.subscribe()
    }

    pub(crate) fn send(&self, message: Message) {
        // A send error only means there are currently no subscribers.
        let _ = self.tx.send(message);
    }
}
