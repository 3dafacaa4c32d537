//! # API Facade
//!
//! The single entry point for a lookup, whatever the UI. It owns the loaded
//! [`Directory`], the clipboard sink and the code settings, checks the lookup's
//! inputs and dispatches to the command layer:
//!
//! - [`commands::resolve`] narrows the directory down to one account
//! - [`commands::generate`] produces the code and feeds the clipboard
//!
//! The facade does no I/O of its own and returns structured results. Time is passed
//! in so the same lookup can be replayed deterministically.
//!
//! `OtpassApi<C: Clipboard>` is generic over the clipboard so tests can record or
//! break copies without touching the OS.

use crate::clipboard::Clipboard;
use crate::commands;
use crate::directory::Directory;
use crate::error::{OtpassError, Result};
use crate::otp::OtpSettings;
use chrono::{DateTime, Utc};

pub const USAGE_MESSAGE: &str = "'P' and/or 'A' required, see usage";

/// Provider and/or account queries for one lookup. At least one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    provider: Option<String>,
    account: Option<String>,
}

impl Lookup {
    pub fn new(provider: Option<String>, account: Option<String>) -> Result<Self> {
        if provider.is_none() && account.is_none() {
            return Err(OtpassError::Usage(USAGE_MESSAGE.to_string()));
        }
        Ok(Self { provider, account })
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

pub struct OtpassApi<C: Clipboard> {
    directory: Directory,
    clipboard: C,
    settings: OtpSettings,
}

impl<C: Clipboard> OtpassApi<C> {
    pub fn new(directory: Directory, clipboard: C, settings: OtpSettings) -> Self {
        Self {
            directory,
            clipboard,
            settings,
        }
    }

    /// Resolves `lookup` and generates the account's code as of `now`.
    pub fn lookup(
        &mut self,
        lookup: &Lookup,
        copy: bool,
        now: DateTime<Utc>,
    ) -> Result<commands::CmdResult> {
        let account =
            commands::resolve::resolve_account(&self.directory, lookup.provider(), lookup.account())?;
        commands::generate::run(
            &self.directory,
            account,
            &self.settings,
            &mut self.clipboard,
            copy,
            now,
        )
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

pub use commands::{CmdMessage, CmdResult, CodeReport, MessageLevel};
