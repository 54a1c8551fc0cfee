/// One page of a `messages.list` response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePage {
    /// Message ids in the order Gmail returned them
    pub ids: Vec<String>,
    /// Continuation token, `None` on the last page
    pub next_page_token: Option<String>,
}

impl MessagePage {
    pub fn new(ids: Vec<String>, next_page_token: Option<String>) -> Self {
        Self {
            ids,
            next_page_token,
        }
    }
}

/// The two message sets the cleaner removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupTarget {
    /// Inbox messages older than one year
    OldInbox,
    /// Everything in the spam folder
    Spam,
}

impl CleanupTarget {
    pub const ALL: [CleanupTarget; 2] = [CleanupTarget::OldInbox, CleanupTarget::Spam];

    /// Gmail search query selecting the target's messages
    pub fn query(&self) -> &'static str {
        match self {
            CleanupTarget::OldInbox => "in:inbox older_than:1y",
            CleanupTarget::Spam => "in:spam",
        }
    }

    /// Folder name used in deletion log lines
    pub fn label(&self) -> &'static str {
        match self {
            CleanupTarget::OldInbox => "Inbox",
            CleanupTarget::Spam => "Spam",
        }
    }

    /// Human description used in search and summary log lines
    pub fn description(&self) -> &'static str {
        match self {
            CleanupTarget::OldInbox => "old inbox",
            CleanupTarget::Spam => "spam",
        }
    }
}
