use crate::domain::errors::ValidationError;

/// A validated object key within a bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > 1024 {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name part of the key (everything after the last '/')
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_keys() {
        assert!(ObjectKey::new("a.txt").is_ok());
        assert!(ObjectKey::new("reports/2024/q1.pdf").is_ok());
    }

    #[test]
    fn rejects_invalid_keys() {
        assert!(ObjectKey::new("").is_err());
        assert!(ObjectKey::new("/leading").is_err());
        assert!(ObjectKey::new("double//slash").is_err());
        assert!(ObjectKey::new("nul\0byte").is_err());
        assert!(ObjectKey::new("k".repeat(1025)).is_err());
    }

    #[test]
    fn file_name_strips_directories() {
        let key = ObjectKey::new("reports/2024/q1.pdf").unwrap();
        assert_eq!(key.file_name(), "q1.pdf");

        let flat = ObjectKey::new("a.txt").unwrap();
        assert_eq!(flat.file_name(), "a.txt");
    }
}
