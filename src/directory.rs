//! Directory sign-in principals
//!
//! Active Directory accepts the same account under several names. Sign-in
//! tries the user principal form (`jane@corp.example`) first and the
//! down-level form (`CORP\jane`) second.

/// Names to try when binding as a directory account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPrincipals {
    /// Bare account name (`sAMAccountName`).
    pub account: String,

    /// User principal name, tried first.
    pub user_principal: String,

    /// Down-level logon name, tried when the first bind is refused.
    pub down_level: Option<String>,
}

impl DirectoryPrincipals {
    /// Derive the principals for what a user typed into the sign-in form.
    ///
    /// `suffix` is the user principal suffix such as `@corp.example`; the
    /// leading `@` is optional. `domain` is the down-level domain; when absent
    /// it is the first label of the suffix, uppercased.
    ///
    /// Returns `None` when no account name remains after stripping.
    #[must_use]
    pub fn resolve(input: &str, suffix: Option<&str>, domain: Option<&str>) -> Option<Self> {
        let input = input.trim();

        let without_domain = input.rsplit_once('\\').map_or(input, |(_, name)| name);
        let (account, typed_suffix) = match without_domain.split_once('@') {
            Some((account, rest)) => (account.trim(), Some(rest)),
            None => (without_domain.trim(), None),
        };

        if account.is_empty() {
            return None;
        }

        let suffix = suffix
            .map(|suffix| suffix.trim().trim_start_matches('@'))
            .filter(|suffix| !suffix.is_empty());

        let user_principal = match (typed_suffix, suffix) {
            (Some(typed), _) if !typed.is_empty() => format!("{account}@{typed}"),
            (_, Some(suffix)) => format!("{account}@{suffix}"),
            _ => account.to_string(),
        };

        let domain = domain
            .map(|domain| domain.trim().to_string())
            .filter(|domain| !domain.is_empty())
            .or_else(|| suffix.and_then(down_level_domain));

        Some(Self {
            account: account.to_string(),
            user_principal,
            down_level: domain.map(|domain| format!("{domain}\\{account}")),
        })
    }

    /// Principals in the order they should be tried.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.user_principal.as_str()).chain(self.down_level.as_deref())
    }
}

/// Address used when the directory has no mail attribute for an account.
#[must_use]
pub fn fallback_email(account: &str, email_suffix: &str) -> String {
    let email_suffix = email_suffix.trim().trim_start_matches('@');

    format!("{}@{email_suffix}", account.to_lowercase())
}

fn down_level_domain(suffix: &str) -> Option<String> {
    suffix
        .split('.')
        .next()
        .filter(|label| !label.is_empty())
        .map(str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_both_forms() {
        let principals = DirectoryPrincipals::resolve("jane", Some("@corp.example"), None);

        assert_eq!(
            principals,
            Some(DirectoryPrincipals {
                account: "jane".to_string(),
                user_principal: "jane@corp.example".to_string(),
                down_level: Some("CORP\\jane".to_string()),
            })
        );
    }

    #[test]
    fn typed_suffix_is_kept() {
        let principals =
            DirectoryPrincipals::resolve("jane@other.example", Some("@corp.example"), None);

        assert_eq!(
            principals.map(|p| (p.account, p.user_principal)),
            Some(("jane".to_string(), "jane@other.example".to_string()))
        );
    }

    #[test]
    fn down_level_input_is_stripped() {
        let principals =
            DirectoryPrincipals::resolve("CORP\\jane", Some("corp.example"), Some("CORPNET"));

        assert_eq!(
            principals.map(|p| (p.user_principal, p.down_level)),
            Some((
                "jane@corp.example".to_string(),
                Some("CORPNET\\jane".to_string())
            ))
        );
    }

    #[test]
    fn no_suffix_or_domain_yields_single_candidate() {
        let principals = DirectoryPrincipals::resolve("jane", None, None);

        let candidates: Vec<String> = principals
            .iter()
            .flat_map(|p| p.candidates().map(str::to_string).collect::<Vec<_>>())
            .collect();

        assert_eq!(candidates, vec!["jane".to_string()]);
    }

    #[test]
    fn empty_account_is_rejected() {
        assert_eq!(DirectoryPrincipals::resolve("  ", Some("@corp.example"), None), None);
        assert_eq!(DirectoryPrincipals::resolve("@corp.example", None, None), None);
    }

    #[test]
    fn fallback_email_uses_suffix() {
        assert_eq!(fallback_email("Jane", "@example.com"), "jane@example.com");
        assert_eq!(fallback_email("jane", "example.com"), "jane@example.com");
    }
}
