use super::CheckError;

/// What the caller asked to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Email(String),
    Domain(String),
}

impl Target {
    /// Build a target from the two optional request parameters. A non-empty
    /// `email` wins over `domain`; empty strings count as absent.
    pub fn from_params(email: Option<&str>, domain: Option<&str>) -> Result<Self, CheckError> {
        let present = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);
        if let Some(email) = present(email) {
            Ok(Self::Email(email))
        } else if let Some(domain) = present(domain) {
            Ok(Self::Domain(domain))
        } else {
            Err(CheckError::MissingTarget)
        }
    }

    /// Domain to resolve. For an email address this is the text after the
    /// first `@` (up to a second `@`, if any); an address without `@` yields
    /// an empty domain, which the resolver rejects.
    pub fn domain(&self) -> &str {
        match self {
            Self::Email(email) => email.split('@').nth(1).unwrap_or(""),
            Self::Domain(domain) => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_takes_precedence() {
        let target = Target::from_params(Some("user@example.com"), Some("other.org")).unwrap();
        assert_eq!(target, Target::Email("user@example.com".into()));
        assert_eq!(target.domain(), "example.com");
    }

    #[test]
    fn empty_email_falls_back_to_domain() {
        let target = Target::from_params(Some(""), Some("example.org")).unwrap();
        assert_eq!(target.domain(), "example.org");
    }

    #[test]
    fn missing_both_is_rejected() {
        let err = Target::from_params(None, Some("")).unwrap_err();
        assert!(matches!(err, CheckError::MissingTarget));
    }

    #[test]
    fn email_domain_edge_cases() {
        assert_eq!(Target::Email("no-at-sign".into()).domain(), "");
        assert_eq!(Target::Email("user@".into()).domain(), "");
        assert_eq!(Target::Email("a@b.example@c.example".into()).domain(), "b.example");
    }
}
