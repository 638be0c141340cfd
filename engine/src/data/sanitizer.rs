// Escaping for the three output dialects, plus decimal localization.
//
// None of these fail: text that does not need a change is returned as is.
use crate::host::ModelHost;
use crate::notation::DecimalNotation;
use cutlist_shared::models::Separator;
use once_cell::sync::Lazy;
use regex::Regex;

// Optional leading tokens, then a bare fraction, then a non-digit unit suffix at the end.
// Digits and whitespace are ASCII only.
static TRAILING_FRACTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\t\n\x0B\f\r ]*[\t\n\x0B\f\r ])*([0-9]+/[0-9]+)([^0-9]*)$").unwrap()
});

static DOT_DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.[0-9]+").unwrap());

/// Escapes text for safe display inside HTML.
///
/// `&` goes first so the ampersands introduced by later substitutions are left alone.
pub fn to_markup_safe(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace(' ', "&#32;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('-', "&#45;")
}

/// Escapes text for CutList Plus import: inch marks are doubled, nothing else
/// changes. Feet, mm and cm suffixes import fine as they are.
pub fn to_dialect_safe_csv(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Prepares a value for spreadsheet CSV.
///
/// Drops the `~` approximation marker, and turns a bare fraction below one
/// (`"1/2 in"`) into a mixed number (`"0 1/2 in"`) so spreadsheets read it as a
/// number instead of text or a date.
pub fn to_generic_csv(text: &str) -> String {
    let stripped = text.replace('~', "");
    let bare_fraction = TRAILING_FRACTION_PATTERN
        .captures(&stripped)
        .is_some_and(|caps| caps.get(1).is_none());
    if bare_fraction {
        format!("0 {}", stripped)
    } else {
        stripped
    }
}

/// Replaces every `.` with `separator` when `text` holds a dotted decimal.
pub fn to_locale_decimal(text: &str, separator: Separator) -> String {
    if DOT_DECIMAL_PATTERN.is_match(text) {
        text.replace('.', &separator.to_string())
    } else {
        text.to_string()
    }
}

/// Like [`to_locale_decimal`], using the session's detected notation.
///
/// Runs detection against `host` if the session has not done so yet.
pub fn localize(text: &str, notation: &mut DecimalNotation, host: &mut dyn ModelHost) -> String {
    if !DOT_DECIMAL_PATTERN.is_match(text) {
        return text.to_string();
    }
    let separator = notation.detect(host);
    to_locale_decimal(text, separator)
}
