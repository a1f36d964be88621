use std::collections::HashMap;

use convo_types::Message;

/// Identifies one outgoing user message for the lifetime of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutgoingId(u64);

/// Where an outgoing message is in its round trip.
///
/// `Pending` is the only state that can move; `Delivered` and `Failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Pending,
    Delivered,
    Failed,
}

/// An optimistically rendered user message and its delivery state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub id: OutgoingId,
    pub text: String,
    pub state: DeliveryState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    /// The record was dropped by a clear, or never existed
    #[error("no outgoing message with id {0:?}")]
    UnknownOutgoing(OutgoingId),

    #[error("outgoing message {id:?} is already {state:?}")]
    AlreadySettled { id: OutgoingId, state: DeliveryState },
}

/// Append-only list of rendered messages.
///
/// Messages are never edited or removed one by one; [`Transcript::clear`]
/// is the only way to drop them.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    outgoing: HashMap<OutgoingId, Outgoing>,
    next_id: u64,
    generation: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message that is not tied to an outgoing send (history replay)
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append the user's message and open a pending record for it
    pub fn begin_outgoing(&mut self, text: impl Into<String>) -> OutgoingId {
        let text = text.into();
        let id = OutgoingId(self.next_id);
        self.next_id += 1;

        self.messages.push(Message::user(text.clone()));
        self.outgoing.insert(
            id,
            Outgoing {
                id,
                text,
                state: DeliveryState::Pending,
            },
        );
        id
    }

    /// Settle `id` as delivered and append the bot's reply
    pub fn deliver(&mut self, id: OutgoingId, reply: impl Into<String>) -> Result<&Message, TranscriptError> {
        self.settle(id, DeliveryState::Delivered)?;
        Ok(self.append(Message::bot(reply)))
    }

    /// Settle `id` as failed and append the apology shown in its place
    pub fn fail(&mut self, id: OutgoingId, apology: impl Into<String>) -> Result<&Message, TranscriptError> {
        self.settle(id, DeliveryState::Failed)?;
        Ok(self.append(Message::bot(apology)))
    }

    pub fn outgoing(&self, id: OutgoingId) -> Option<&Outgoing> {
        self.outgoing.get(&id)
    }

    pub fn state_of(&self, id: OutgoingId) -> Option<DeliveryState> {
        self.outgoing(id).map(|o| o.state)
    }

    /// Number of sends still waiting on the service
    pub fn pending_count(&self) -> usize {
        self.outgoing
            .values()
            .filter(|o| o.state == DeliveryState::Pending)
            .count()
    }

    /// Drop every message and every outgoing record.
    ///
    /// Ids handed out before the clear stay unique, so a late reply to a
    /// cleared send is reported as [`TranscriptError::UnknownOutgoing`].
    pub fn clear(&mut self) {
        self.messages.clear();
        self.outgoing.clear();
        self.generation += 1;
    }

    /// Number of clears so far. Work started before a clear can compare
    /// this to tell that its result is stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn settle(&mut self, id: OutgoingId, to: DeliveryState) -> Result<(), TranscriptError> {
        let record = self
            .outgoing
            .get_mut(&id)
            .ok_or(TranscriptError::UnknownOutgoing(id))?;

        if record.state != DeliveryState::Pending {
            return Err(TranscriptError::AlreadySettled {
                id,
                state: record.state,
            });
        }

        record.state = to;
        Ok(())
    }

    fn append(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}
