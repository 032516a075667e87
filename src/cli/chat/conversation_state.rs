use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Prefix shown in front of the message in the transcript
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "DASH",
        }
    }
}

/// One transcript entry. Never changed after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The transcript of one chat session and the id the agent knows it by
pub struct ConversationState {
    session_id: String,
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// Per-user session context.
///
/// The conversation is created on first access and reused afterwards, so
/// every agent call made through it shares one session id.
#[derive(Default)]
pub struct Session {
    state: Option<ConversationState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&mut self) -> &mut ConversationState {
        self.state.get_or_insert_with(ConversationState::new)
    }
}
