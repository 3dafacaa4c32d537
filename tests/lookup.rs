use chrono::{DateTime, TimeZone, Utc};
use otpass::api::{Lookup, MessageLevel, OtpassApi};
use otpass::clipboard::Clipboard;
use otpass::directory;
use otpass::error::{OtpassError, Result};
use otpass::model::Searchable;
use otpass::otp::OtpSettings;

// Both alice secrets are the RFC 6238 seed, so their codes are known.
const DIRECTORY: &str = "
GitHub:
  accounts:
    - alice: GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ
    - bob: JBSWY3DPEHPK3PXP
Amazon Web Services:
  alias: aws
  accounts:
    - alice: GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ
Empty:
  accounts: []
";

#[derive(Default)]
struct MemoryClipboard {
    contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

struct DeniedClipboard;

impl Clipboard for DeniedClipboard {
    fn copy(&mut self, _text: &str) -> Result<()> {
        Err(OtpassError::Clipboard("access denied".to_string()))
    }
}

fn setup() -> OtpassApi<MemoryClipboard> {
    let dir = directory::load(DIRECTORY).unwrap();
    OtpassApi::new(dir, MemoryClipboard::default(), OtpSettings::default())
}

fn at(unix_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(unix_seconds, 0).unwrap()
}

fn lookup(provider: Option<&str>, account: Option<&str>) -> Lookup {
    Lookup::new(provider.map(String::from), account.map(String::from)).unwrap()
}

#[test]
fn test_provider_only_uses_first_account() {
    let mut api = setup();
    let res = api.lookup(&lookup(Some("github"), None), true, at(59)).unwrap();

    let report = res.report.unwrap();
    assert_eq!(report.to_string(), "GitHub\nalice\n287082");
    assert_eq!(api.clipboard().contents.as_deref(), Some("287082"));
}

#[test]
fn test_provider_alias_and_account() {
    let mut api = setup();
    let res = api
        .lookup(&lookup(Some("aws"), Some("alice")), false, at(59))
        .unwrap();

    let report = res.report.unwrap();
    assert_eq!(report.provider, "Amazon Web Services");
    assert_eq!(report.account, "alice");
    assert!(api.clipboard().contents.is_none());
}

#[test]
fn test_same_window_same_code() {
    let mut api = setup();
    let query = lookup(None, Some("alice"));
    let first = api.lookup(&query, false, at(60)).unwrap().report.unwrap();
    let second = api.lookup(&query, false, at(89)).unwrap().report.unwrap();
    let third = api.lookup(&query, false, at(90)).unwrap().report.unwrap();

    assert_eq!(first.code, second.code);
    assert_ne!(first.code, third.code);
    assert_eq!(first.provider, "GitHub");
}

#[test]
fn test_no_match_reports_query() {
    let mut api = setup();
    let err = api
        .lookup(&lookup(Some("doesnotexist"), None), true, at(59))
        .unwrap_err();
    assert_eq!(err.to_string(), "No Match For: doesnotexist");
    assert!(api.clipboard().contents.is_none());
}

#[test]
fn test_empty_provider_is_distinct_error() {
    let mut api = setup();
    let err = api
        .lookup(&lookup(Some("empty"), None), true, at(59))
        .unwrap_err();
    assert!(matches!(err, OtpassError::EmptyCandidates(_)));
}

#[test]
fn test_denied_clipboard_is_not_fatal() {
    let dir = directory::load(DIRECTORY).unwrap();
    let mut api = OtpassApi::new(dir, DeniedClipboard, OtpSettings::default());

    let res = api.lookup(&lookup(Some("github"), None), true, at(59)).unwrap();
    assert_eq!(res.report.unwrap().code, "287082");
    assert!(res
        .messages
        .iter()
        .any(|m| m.level == MessageLevel::Warning && m.content.contains("access denied")));
}

#[test]
fn test_directory_round_trip_keeps_order() {
    let api = setup();
    let accounts: Vec<(&str, &str)> = api
        .directory()
        .accounts()
        .map(|a| {
            let provider = api.directory().provider(a.provider()).unwrap();
            (provider.name(), a.name())
        })
        .collect();
    assert_eq!(
        accounts,
        vec![
            ("GitHub", "alice"),
            ("GitHub", "bob"),
            ("Amazon Web Services", "alice"),
        ]
    );
}

#[test]
fn test_every_alias_set_holds_sanitized_name() {
    let api = setup();
    for provider in api.directory().providers() {
        assert!(provider.aliases().contains(&provider.sanitized_name()));
        for account in provider.accounts() {
            assert!(account.aliases().contains(&account.sanitized_name()));
        }
    }
}
