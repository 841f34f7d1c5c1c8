/// Display time for ordinary notices, in milliseconds.
const SHORT_DURATION_MS: u64 = 2000;

/// Display time for notices the user must act on, in milliseconds.
const LONG_DURATION_MS: u64 = 3500;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A transient message for the user. Never blocks interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
    pub duration_ms: u64,
}

/// In-memory notice queue with monotonic ID assignment.
///
/// Showing and expiring notices is up to the front-end, which drains the
/// queue after each update.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notice and return its ID.
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>, duration_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            text: text.into(),
            duration_ms,
        });
        id
    }

    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, text, SHORT_DURATION_MS)
    }

    pub fn warning(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Warning, text, SHORT_DURATION_MS)
    }

    /// Errors stay up longer.
    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, text, LONG_DURATION_MS)
    }

    /// Remove a notice by ID. Returns whether it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let len_before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != len_before
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn get(&self, id: u64) -> Option<&Notice> {
        self.notices.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Text of the newest notice.
    pub fn latest(&self) -> Option<&str> {
        self.notices.last().map(|n| n.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
