//! Input sanitization, upload and redirect checks, and Iranian identifier
//! checks.
//!
//! All functions are pure. Pattern checks are conservative filters for form
//! fields, not a substitute for parameterised queries or output encoding on
//! the server.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::core::Validation;

/// Minimum length accepted by [`check_password`].
pub const MIN_PASSWORD_LEN: usize = 10;

/// Characters that satisfy [`PasswordRule::Special`].
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Largest upload accepted by the default [`UploadPolicy`].
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted by the default [`UploadPolicy`].
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Extensions accepted by the default [`UploadPolicy`].
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

const MIB: u64 = 1024 * 1024;

// `\d` is Unicode-aware in `regex`; only ASCII digits are valid here.
static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09[0-9]{9}$").expect("valid regex"));

static LANDLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[0-9]{2,3}[0-9]{8}$").expect("valid regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email pattern compiles")
});

static SQL_INJECTION: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)union\s+select",
        r"(?i)drop\s+table",
        r"(?i)insert\s+into",
        r"(?i)delete\s+from",
        r"(?i)update\s+\w+\s+set",
        r"(?i)exec\s*\(",
        r"(?i)execute\s*\(",
        r"--",
        r"/\*",
        r"\*/",
    ])
    .expect("sql injection patterns compile")
});

static XSS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)onerror\s*=",
        r"(?i)onload\s*=",
        r"(?i)onclick\s*=",
        r"(?i)<iframe",
        r"(?i)<object",
        r"(?i)<embed",
        r"(?i)eval\s*\(",
    ])
    .expect("xss patterns compile")
});

/// Escapes `& < > " ' /` for safe inclusion in HTML text and attributes.
///
/// ```
/// use retry_rail::validation::escape_html;
///
/// assert_eq!(escape_html("<b>\"hi\"</b>"), "&lt;b&gt;&quot;hi&quot;&lt;&#x2F;b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Mobile (`09` + 9 digits) or landline (area code + 8 digits) number.
pub fn is_iranian_phone(phone: &str) -> bool {
    MOBILE.is_match(phone) || LANDLINE.is_match(phone)
}

/// Exactly ten ASCII digits.
pub fn is_postal_code(code: &str) -> bool {
    code.len() == 10 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Ten-digit national code with a valid mod-11 check digit.
///
/// ```
/// use retry_rail::validation::is_national_code;
///
/// assert!(is_national_code("0499370899"));
/// assert!(!is_national_code("0499370898"));
/// ```
pub fn is_national_code(code: &str) -> bool {
    if !is_postal_code(code) {
        return false;
    }
    let digits: Vec<u32> = code.bytes().map(|b| u32::from(b - b'0')).collect();
    let check = digits[9];
    let sum: u32 = digits[..9]
        .iter()
        .zip((2..=10).rev())
        .map(|(d, w)| d * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        check == remainder
    } else {
        check == 11 - remainder
    }
}

pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// A password requirement that was not met.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PasswordRule {
    Length,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "must be at least {MIN_PASSWORD_LEN} characters"),
            Self::Uppercase => f.write_str("must contain an uppercase letter"),
            Self::Lowercase => f.write_str("must contain a lowercase letter"),
            Self::Digit => f.write_str("must contain a digit"),
            Self::Special => f.write_str("must contain a special character"),
        }
    }
}

/// Checks every password rule and reports all that fail.
///
/// ```
/// use retry_rail::validation::{check_password, PasswordRule};
///
/// assert!(check_password("Str0ng&Secure").is_valid());
///
/// let errors = check_password("short").into_errors().unwrap();
/// assert!(errors.contains(&PasswordRule::Length));
/// assert!(errors.contains(&PasswordRule::Uppercase));
/// ```
pub fn check_password(password: &str) -> Validation<PasswordRule, ()> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has = |pred: fn(char) -> bool| password.chars().any(pred);
    let checks = [
        (PasswordRule::Length, long_enough),
        (PasswordRule::Uppercase, has(|c| c.is_ascii_uppercase())),
        (PasswordRule::Lowercase, has(|c| c.is_ascii_lowercase())),
        (PasswordRule::Digit, has(|c| c.is_ascii_digit())),
        (PasswordRule::Special, has(is_password_special)),
    ];
    let failed = checks
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(rule, _)| rule);
    Validation::from_errors(failed, ())
}

fn is_password_special(c: char) -> bool {
    PASSWORD_SPECIALS.contains(c)
}

pub fn has_sql_injection(input: &str) -> bool {
    SQL_INJECTION.is_match(input)
}

pub fn has_xss(input: &str) -> bool {
    XSS.is_match(input)
}

/// Reason a free-text input was refused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputRejection {
    SqlInjection,
    Xss,
}

impl fmt::Display for InputRejection {
    /// Both variants render the same user-facing text so a rejected input
    /// does not reveal which filter caught it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid input")
    }
}

impl std::error::Error for InputRejection {}

/// Refuses inputs that match SQL injection or XSS patterns.
pub fn validate_input(input: &str) -> Result<(), InputRejection> {
    if has_sql_injection(input) {
        return Err(InputRejection::SqlInjection);
    }
    if has_xss(input) {
        return Err(InputRejection::Xss);
    }
    Ok(())
}

/// Size, MIME type and extension limits for user uploads.
///
/// The default accepts JPEG, PNG, GIF and WebP images up to 5MB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadPolicy<'a> {
    pub max_bytes: u64,
    pub mime_types: &'a [&'a str],
    /// Lowercase, dot-prefixed extensions such as `.png`.
    pub extensions: &'a [&'a str],
}

impl Default for UploadPolicy<'static> {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            mime_types: IMAGE_MIME_TYPES,
            extensions: IMAGE_EXTENSIONS,
        }
    }
}

impl<'a> UploadPolicy<'a> {
    /// Sets the largest accepted size in bytes.
    #[inline]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Sets the accepted MIME types.
    #[inline]
    pub fn with_mime_types(mut self, mime_types: &'a [&'a str]) -> Self {
        self.mime_types = mime_types;
        self
    }

    /// Sets the accepted extensions.
    #[inline]
    pub fn with_extensions(mut self, extensions: &'a [&'a str]) -> Self {
        self.extensions = extensions;
        self
    }

    /// Checks size first, then MIME type, then extension.
    ///
    /// The extension is whatever follows the last `.` of `file_name`,
    /// lowercased; a name without a dot never matches.
    ///
    /// ```
    /// use retry_rail::validation::{UploadPolicy, UploadRejection};
    ///
    /// let policy = UploadPolicy::default();
    /// assert!(policy.check("shoe.PNG", "image/png", 120_000).is_ok());
    /// assert_eq!(
    ///     policy.check("invoice.pdf", "application/pdf", 80_000),
    ///     Err(UploadRejection::MimeType)
    /// );
    /// ```
    pub fn check(
        &self,
        file_name: &str,
        mime_type: &str,
        size: u64,
    ) -> Result<(), UploadRejection> {
        if size > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                max_bytes: self.max_bytes,
            });
        }
        if !self.mime_types.contains(&mime_type) {
            return Err(UploadRejection::MimeType);
        }
        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => format!(".{}", ext.to_lowercase()),
            None => return Err(UploadRejection::Extension),
        };
        if !self.extensions.contains(&extension.as_str()) {
            return Err(UploadRejection::Extension);
        }
        Ok(())
    }
}

/// Reason an upload was refused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadRejection {
    TooLarge { max_bytes: u64 },
    MimeType,
    Extension,
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { max_bytes } if max_bytes % MIB == 0 => {
                write!(f, "file must not exceed {}MB", max_bytes / MIB)
            }
            Self::TooLarge { max_bytes } => {
                write!(f, "file must not exceed {max_bytes} bytes")
            }
            Self::MimeType => f.write_str("file type is not allowed"),
            Self::Extension => f.write_str("file extension is not allowed"),
        }
    }
}

impl std::error::Error for UploadRejection {}

/// Checks an upload against [`UploadPolicy::default`].
pub fn validate_file_upload(
    file_name: &str,
    mime_type: &str,
    size: u64,
) -> Result<(), UploadRejection> {
    UploadPolicy::default().check(file_name, mime_type, size)
}

/// A redirect target that leaves the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectRejection {
    pub target: String,
}

impl fmt::Display for RedirectRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid redirect url: {}", self.target)
    }
}

impl std::error::Error for RedirectRejection {}

/// Returns `true` for a site-relative path or a URL on `origin`.
///
/// Protocol-relative targets (`//host`, `/\host`) and hosts that merely
/// start with `origin` are refused.
///
/// ```
/// use retry_rail::validation::is_safe_redirect;
///
/// let origin = "https://shop.example";
/// assert!(is_safe_redirect("/cart?step=2", origin));
/// assert!(is_safe_redirect("https://shop.example/orders", origin));
/// assert!(!is_safe_redirect("https://shop.example.evil.io/", origin));
/// assert!(!is_safe_redirect("//evil.io", origin));
/// ```
pub fn is_safe_redirect(url: &str, origin: &str) -> bool {
    if let Some(path) = url.strip_prefix('/') {
        return !path.starts_with(['/', '\\']);
    }
    let origin = origin.trim_end_matches('/');
    if origin.is_empty() {
        return false;
    }
    match url.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

/// Passes `url` through when [`is_safe_redirect`] accepts it.
pub fn secure_redirect<'u>(url: &'u str, origin: &str) -> Result<&'u str, RedirectRejection> {
    if is_safe_redirect(url, origin) {
        Ok(url)
    } else {
        #[cfg(feature = "tracing")]
        tracing::warn!(target_url = url, "refused off-site redirect");
        Err(RedirectRejection {
            target: url.to_owned(),
        })
    }
}
