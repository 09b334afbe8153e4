//! Reverses common indicator defanging.
//!
//! Threat reports routinely write `evil[.]com` or `hxxp://` so that
//! indicators are not clickable. The detector refangs a selection before
//! matching so the defanged and plain spellings classify identically.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

#[expect(clippy::expect_used, reason = "static pattern is known to be valid")]
static DOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\.\]|\(\.\)|\{\.\}|\[dot\]|\(dot\)|\{dot\}").expect("dot pattern")
});

#[expect(clippy::expect_used, reason = "static pattern is known to be valid")]
static COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[:\]").expect("colon pattern"));

#[expect(clippy::expect_used, reason = "static pattern is known to be valid")]
static AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[@\]|\(@\)|\[at\]|\(at\)").expect("at pattern"));

#[expect(clippy::expect_used, reason = "static pattern is known to be valid")]
static HTTP_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bh(?:xx|\*\*)p(s?)://").expect("http scheme pattern"));

#[expect(clippy::expect_used, reason = "static pattern is known to be valid")]
static FTP_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfxp://").expect("ftp scheme pattern"));

/// Replaces defanged separators and schemes with their plain forms.
///
/// Text without defanged notation is returned borrowed.
///
/// # Example
///
/// ```
/// use quarry_core::refang;
///
/// assert_eq!(refang("hxxps://evil[.]example[.]com/a"), "https://evil.example.com/a");
/// assert_eq!(refang("analyst(at)example[.]org"), "analyst@example.org");
/// assert_eq!(refang("plain.example"), "plain.example");
/// ```
#[must_use]
pub fn refang(text: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(text);
    current = replace(current, &DOT, ".");
    current = replace(current, &COLON, ":");
    current = replace(current, &AT, "@");
    current = replace(current, &HTTP_SCHEME, "http${1}://");
    replace(current, &FTP_SCHEME, "ftp://")
}

fn replace<'a>(text: Cow<'a, str>, pattern: &Regex, replacement: &str) -> Cow<'a, str> {
    if !pattern.is_match(&text) {
        return text;
    }
    Cow::Owned(pattern.replace_all(&text, replacement).into_owned())
}
