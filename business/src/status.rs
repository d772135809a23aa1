pub const SAVED: &str = "Changes saved";
pub const REFRESHED: &str = "Data refreshed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The status line shown under the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: Option<StatusKind>,
}

impl Status {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: Some(StatusKind::Success),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: Some(StatusKind::Error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == Some(StatusKind::Error)
    }

    /// Modifier class for the status element, if any.
    pub fn css_class(&self) -> Option<&'static str> {
        match self.kind {
            Some(StatusKind::Success) => Some("status--success"),
            Some(StatusKind::Error) => Some("status--error"),
            None => None,
        }
    }
}
