use crate::domain::errors::ValidationError;

/// A validated bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new BucketName, enforcing S3-compatible naming rules
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.len() < 3 || value.len() > 63 {
            return Err(ValidationError::BucketNameLength {
                actual: value.len(),
                min: 3,
                max: 63,
            });
        }

        let first = value.chars().next().unwrap_or_default();
        if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
            return Err(ValidationError::BucketNameInvalidStart);
        }

        let last = value.chars().last().unwrap_or_default();
        if !last.is_ascii_lowercase() && !last.is_ascii_digit() {
            return Err(ValidationError::BucketNameInvalidEnd);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }

        if value.contains("--") {
            return Err(ValidationError::BucketNameConsecutiveHyphens);
        }

        if looks_like_ip_address(&value) {
            return Err(ValidationError::BucketNameLooksLikeIpAddress);
        }

        Ok(Self(value))
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn looks_like_ip_address(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 4 && parts.iter().all(|part| part.parse::<u8>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        assert!(BucketName::new("public").is_ok());
        assert!(BucketName::new("docs").is_ok());
        assert!(BucketName::new("user-uploads-2024").is_ok());
        assert!(BucketName::new("0backups").is_ok());
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(BucketName::new("ab").is_err());
        assert!(BucketName::new("a".repeat(64)).is_err());
        assert!(BucketName::new("-docs").is_err());
        assert!(BucketName::new("docs-").is_err());
        assert!(BucketName::new("Docs").is_err());
        assert!(BucketName::new("my_docs").is_err());
        assert!(BucketName::new("my--docs").is_err());
        assert!(BucketName::new("10.0.0.1").is_err());
    }
}
