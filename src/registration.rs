//! Customer self-registration checks

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use smallvec::SmallVec;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest address accepted by [`is_valid_email`].
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    ))
    .ok()
});

/// Submitted registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Contact and sign-in address.
    pub email: String,

    /// Customer's company.
    pub company: String,

    /// Optional phone number.
    pub phone: Option<String>,

    /// Chosen password.
    pub password: String,

    /// Repeated password.
    pub confirm_password: String,
}

/// Registration that passed every check, with names trimmed and the email
/// lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Lowercased email.
    pub email: String,

    /// Customer's company.
    pub company: String,

    /// Phone number, `None` when blank.
    pub phone: Option<String>,

    /// Chosen password.
    pub password: String,
}

/// One failed check against a named form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field name as submitted by clients.
    pub field: &'static str,

    /// Human readable reason.
    pub message: &'static str,
}

/// Every failed check of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(SmallVec<[Violation; 4]>);

impl Violations {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(Violation { field, message });
    }

    /// Whether no check failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed, in check order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|violation| violation.field)
    }

    /// All violations.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        let mut violations = Self::default();
        violations.0.push(violation);
        violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{}: {}", violation.field, violation.message)?;
        }

        Ok(())
    }
}

impl Registration {
    /// Check every field and collect all failures.
    ///
    /// # Errors
    ///
    /// Returns every violated field when at least one check fails.
    pub fn validate(self) -> Result<ValidRegistration, Violations> {
        let mut violations = Violations::default();

        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let company = self.company.trim().to_string();
        let email = self.email.trim().to_lowercase();

        if first_name.is_empty() {
            violations.push("firstName", "First name is required");
        }

        if last_name.is_empty() {
            violations.push("lastName", "Last name is required");
        }

        if !is_valid_email(&email) {
            violations.push("email", "Invalid email address");
        }

        if company.is_empty() {
            violations.push("company", "Company name is required");
        }

        if let Some(violation) = check_password(&self.password) {
            violations.0.push(violation);
        }

        if self.password != self.confirm_password {
            violations.push("confirmPassword", "Passwords don't match");
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(ValidRegistration {
            first_name,
            last_name,
            email,
            company,
            phone: self
                .phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
            password: self.password,
        })
    }
}

/// Check a new password against the length rule.
#[must_use]
pub fn check_password(password: &str) -> Option<Violation> {
    (password.chars().count() < MIN_PASSWORD_LEN).then_some(Violation {
        field: "password",
        message: "Password must be at least 8 characters",
    })
}

/// Syntactic email check. The domain must contain at least one dot.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

/// Username derived from an email address: the lowercased local part with
/// anything other than ASCII letters, digits, `.`, `_` and `-` removed.
#[must_use]
pub fn username_from_email(email: &str) -> String {
    let local = email.split_once('@').map_or(email, |(local, _)| local);

    let username: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase();

    if username.is_empty() {
        "customer".to_string()
    } else {
        username
    }
}
