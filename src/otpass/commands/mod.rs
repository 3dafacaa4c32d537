use std::fmt;

pub mod generate;
pub mod resolve;

/// Levels a command can report alongside its result. Failures are errors, not messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// What a successful lookup shows: provider, account and code, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReport {
    pub provider: String,
    pub account: String,
    pub code: String,
    pub expires_in: u64,
}

impl fmt::Display for CodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.provider, self.account, self.code)
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub report: Option<CodeReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_report(mut self, report: CodeReport) -> Self {
        self.report = Some(report);
        self
    }
}
