use thiserror::Error;

/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    // ObjectKey validation errors
    #[error("object key cannot be empty")]
    EmptyObjectKey,

    #[error("object key too long: {actual} bytes (max: {max})")]
    ObjectKeyTooLong { actual: usize, max: usize },

    #[error("invalid character in object key: {0:?}")]
    InvalidObjectKeyCharacter(char),

    #[error("object key cannot start with '/'")]
    ObjectKeyStartsWithSlash,

    #[error("object key cannot contain '//'")]
    ObjectKeyContainsDoubleSlash,

    // BucketName validation errors
    #[error("bucket name must be between {min} and {max} characters, got {actual}")]
    BucketNameLength {
        actual: usize,
        min: usize,
        max: usize,
    },

    #[error("bucket name must start with a lowercase letter or digit")]
    BucketNameInvalidStart,

    #[error("bucket name must end with a lowercase letter or digit")]
    BucketNameInvalidEnd,

    #[error("invalid character in bucket name: {0:?}")]
    BucketNameInvalidCharacter(char),

    #[error("bucket name cannot contain consecutive hyphens")]
    BucketNameConsecutiveHyphens,

    #[error("bucket name cannot be formatted as an IP address")]
    BucketNameLooksLikeIpAddress,
}
