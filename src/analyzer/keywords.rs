//! Constant tables used by the HTML analyzer
//!
//! All tables are immutable and compared against lower-cased input.

/// Heading tags counted by the analyzer, in rank order
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Version reported when the document has no recognizable DOCTYPE
pub const VERSION_UNKNOWN: &str = "Unknown/No DOCTYPE";

/// Version reported when there is no DOCTYPE but HTML5-only markup is present
pub const VERSION_HTML5: &str = "HTML5";

/// DOCTYPE patterns, most specific first
///
/// A row matches when the lower-cased declaration contains every one of its
/// substrings; the first matching row wins. Requiring the version and the
/// flavor separately covers both the `html 4.01 strict` and
/// `html 4.01//strict` spellings as well as real public/system identifiers
/// (`-//W3C//DTD HTML 4.01//EN` + `.../strict.dtd`). A 4.01 or XHTML 1.0
/// declaration with no flavor at all is the strict DTD.
pub const DOCTYPE_PATTERNS: &[(&[&str], &str)] = &[
    (&["html 4.01", "strict"], "HTML 4.01 Strict"),
    (&["html 4.01", "transitional"], "HTML 4.01 Transitional"),
    (&["html 4.01", "loose"], "HTML 4.01 Transitional"),
    (&["html 4.01", "frameset"], "HTML 4.01 Frameset"),
    (&["html 4.01"], "HTML 4.01 Strict"),
    (&["html 4.0"], "HTML 4.0"),
    (&["html 3.2"], "HTML 3.2"),
    (&["html 2.0"], "HTML 2.0"),
    (&["xhtml 1.1"], "XHTML 1.1"),
    (&["xhtml 1.0", "strict"], "XHTML 1.0 Strict"),
    (&["xhtml 1.0", "transitional"], "XHTML 1.0 Transitional"),
    (&["xhtml 1.0", "frameset"], "XHTML 1.0 Frameset"),
    (&["xhtml 1.0"], "XHTML 1.0 Strict"),
    (&["xhtml basic"], "XHTML Basic"),
    (&["xhtml mobile"], "XHTML Mobile Profile"),
    (&["xhtml"], "XHTML"),
    (&["html"], "HTML"),
];

/// Elements introduced by HTML5
pub const HTML5_ELEMENTS: &[&str] = &[
    "article",
    "aside",
    "audio",
    "canvas",
    "datalist",
    "details",
    "embed",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "keygen",
    "mark",
    "meter",
    "nav",
    "output",
    "progress",
    "rp",
    "rt",
    "ruby",
    "section",
    "source",
    "summary",
    "time",
    "track",
    "video",
    "wbr",
];

/// `<input type>` values introduced by HTML5
pub const HTML5_INPUT_TYPES: &[&str] = &[
    "email",
    "url",
    "tel",
    "search",
    "number",
    "range",
    "date",
    "time",
    "datetime",
    "datetime-local",
    "month",
    "week",
    "color",
];

/// Global attributes introduced by HTML5
pub const HTML5_ATTRIBUTES: &[&str] = &["contenteditable", "draggable", "hidden", "spellcheck"];

/// Tokens in `<input>` name/id/class that suggest a login field
pub const LOGIN_INPUT_TOKENS: &[&str] = &[
    "username",
    "userid",
    "user_id",
    "password",
    "passwd",
    "pwd",
    "pass",
    "passphrase",
    "login",
    "signin",
    "authenticate",
    "remember",
    "remember_me",
    "stay_logged_in",
];

/// Keywords in form/button/link attributes and visible text that suggest authentication
pub const LOGIN_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "sign-in",
    "sign_in",
    "log-in",
    "log_in",
    "sign in",
    "log in",
    "logon",
    "log on",
    "password",
    "passwd",
    "pwd",
    "pass",
    "username",
    "userid",
    "user_id",
    "authenticate",
    "authentication",
    "credentials",
    "credential",
    "forgot password",
    "reset password",
    "password reset",
    "remember me",
    "stay logged in",
];

/// Attributes of `<form>` inspected for login keywords
pub const FORM_ATTRIBUTES: &[&str] = &["action", "id", "class", "name"];

/// Attributes of `<button>` and `<a>` inspected for login keywords
pub const CONTROL_ATTRIBUTES: &[&str] = &["id", "class", "name", "value"];

/// Attributes of `<input>` inspected for login tokens
pub const INPUT_ATTRIBUTES: &[&str] = &["name", "id", "class"];

/// Elements whose leading text is inspected for login keywords
pub const TEXT_ELEMENTS: &[&str] = &[
    "button", "a", "h1", "h2", "h3", "h4", "h5", "h6", "label", "span", "div", "p", "legend",
    "title",
];

/// Returns true if `value` contains any of `needles`
///
/// `value` is expected to be lower-cased already.
pub fn contains_any(value: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| value.contains(needle))
}
