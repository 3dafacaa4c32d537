use crate::clipboard::Clipboard;
use crate::commands::{CmdMessage, CmdResult, CodeReport};
use crate::directory::Directory;
use crate::error::{OtpassError, Result};
use crate::model::{Account, Searchable};
use crate::otp::OtpSettings;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Generates the code for `account` and, if `copy` is set, hands it to `clipboard`.
///
/// A clipboard failure becomes a warning on the result; the code is still reported.
pub fn run<C: Clipboard>(
    directory: &Directory,
    account: &Account,
    settings: &OtpSettings,
    clipboard: &mut C,
    copy: bool,
    at: DateTime<Utc>,
) -> Result<CmdResult> {
    let provider = directory.provider(account.provider()).ok_or_else(|| {
        OtpassError::MalformedDirectory(format!(
            "account '{}' has no provider",
            account.name()
        ))
    })?;

    let generated = account.generate_code(settings, at)?;
    debug!(
        provider = provider.name(),
        account = account.name(),
        expires_in = generated.expires_in,
        "generated code"
    );

    let mut result = CmdResult::default();
    if copy {
        if let Err(e) = clipboard.copy(&generated.code) {
            debug!(error = %e, "clipboard copy failed");
            result.add_message(CmdMessage::warning(format!(
                "Failed to copy to clipboard: {}",
                e
            )));
        }
    }

    Ok(result.with_report(CodeReport {
        provider: provider.name().to_string(),
        account: account.name().to_string(),
        code: generated.code,
        expires_in: generated.expires_in,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::directory;
    use chrono::TimeZone;

    const DIRECTORY: &str = "GitHub:\n  accounts:\n    - alice: GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ\n";

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn copy(&mut self, _text: &str) -> Result<()> {
            Err(OtpassError::Clipboard("no display".to_string()))
        }
    }

    fn at_59() -> DateTime<Utc> {
        Utc.timestamp_opt(59, 0).unwrap()
    }

    #[test]
    fn reports_provider_account_and_code() {
        let dir = directory::load(DIRECTORY).unwrap();
        let alice = dir.accounts().next().unwrap();
        let mut clipboard = RecordingClipboard::default();

        let result = run(&dir, alice, &OtpSettings::default(), &mut clipboard, true, at_59()).unwrap();
        let report = result.report.unwrap();
        assert_eq!(report.to_string(), "GitHub\nalice\n287082");
        assert_eq!(report.expires_in, 1);
        assert_eq!(clipboard.copied, vec!["287082".to_string()]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn no_copy_leaves_clipboard_alone() {
        let dir = directory::load(DIRECTORY).unwrap();
        let alice = dir.accounts().next().unwrap();
        let mut clipboard = RecordingClipboard::default();

        run(&dir, alice, &OtpSettings::default(), &mut clipboard, false, at_59()).unwrap();
        assert!(clipboard.copied.is_empty());
    }

    #[test]
    fn clipboard_failure_is_only_a_warning() {
        let dir = directory::load(DIRECTORY).unwrap();
        let alice = dir.accounts().next().unwrap();

        let result = run(&dir, alice, &OtpSettings::default(), &mut BrokenClipboard, true, at_59()).unwrap();
        assert_eq!(result.report.unwrap().code, "287082");
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("no display"));
    }

    #[test]
    fn invalid_secret_fails_before_copying() {
        let dir = directory::load("GitHub:\n  accounts:\n    - alice: '!!!'\n").unwrap();
        let alice = dir.accounts().next().unwrap();
        let mut clipboard = RecordingClipboard::default();

        let err = run(&dir, alice, &OtpSettings::default(), &mut clipboard, true, at_59()).unwrap_err();
        assert!(matches!(err, OtpassError::InvalidSecret(_)));
        assert!(clipboard.copied.is_empty());
    }
}
