/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates an email address shape: non-empty local part, a single '@',
/// and a dotted domain. Deliberately not RFC-complete.
pub fn validate_email(email: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if email.is_empty() {
        issues.push("email must not be empty".to_string());
        return issues;
    }
    if email.chars().any(char::is_whitespace) {
        issues.push("email must not contain whitespace".to_string());
        return issues;
    }

    match email.split_once('@') {
        None => issues.push("email is missing '@'".to_string()),
        Some((local, domain)) => {
            if local.is_empty() {
                issues.push("email is missing the part before '@'".to_string());
            }
            if domain.is_empty() || !domain.contains('.') {
                issues.push("email domain must contain a '.'".to_string());
            } else if domain.split('.').any(str::is_empty) {
                issues.push("email domain has an empty label".to_string());
            }
        }
    }

    issues
}

/// Validates a raw password against the length policy.
pub fn validate_password(password: &str) -> Vec<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        vec![format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("alice@example.com").is_empty());
        assert!(validate_email("a.b+c@sub.example.co").is_empty());
    }

    #[test]
    fn test_email_missing_at() {
        let issues = validate_email("alice.example.com");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains('@'));
    }

    #[test]
    fn test_email_missing_local_part() {
        assert!(!validate_email("@example.com").is_empty());
    }

    #[test]
    fn test_email_undotted_domain() {
        assert!(!validate_email("alice@localhost").is_empty());
    }

    #[test]
    fn test_email_empty_domain_label() {
        assert!(!validate_email("alice@example..com").is_empty());
    }

    #[test]
    fn test_email_with_whitespace() {
        assert!(!validate_email("alice @example.com").is_empty());
    }

    #[test]
    fn test_empty_email() {
        assert!(!validate_email("").is_empty());
    }

    #[test]
    fn test_email_collects_multiple_issues() {
        let issues = validate_email("@localhost");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_password_length_boundary() {
        assert!(!validate_password("1234567").is_empty());
        assert!(validate_password("12345678").is_empty());
    }

    #[test]
    fn test_password_length_counts_chars_not_bytes() {
        // 8 multi-byte characters pass even though the byte count differs
        assert!(validate_password("pæsswørd").is_empty());
    }
}
