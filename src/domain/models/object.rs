use chrono::{DateTime, Utc};

use crate::domain::value_objects::{BucketName, ObjectKey};

/// One entry of a single-page bucket listing
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub key: ObjectKey,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// Metadata returned after a successful upload
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub size: u64,
    pub etag: Option<String>,
}

/// Metadata returned after a successful server-side copy
#[derive(Debug, Clone)]
pub struct CopyReceipt {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub etag: Option<String>,
}

/// Outcome of an existence check.
///
/// A check without a key is not an error and not a "no": it is answered
/// with `Unspecified`, keeping the three cases distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// No key was supplied, so nothing was checked
    Unspecified,
    /// The object exists
    Present,
    /// The object does not exist
    Absent,
}

impl Existence {
    pub fn from_bool(present: bool) -> Self {
        if present {
            Existence::Present
        } else {
            Existence::Absent
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Existence::Present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existence_three_values_are_distinct() {
        assert_ne!(Existence::Unspecified, Existence::Absent);
        assert!(Existence::from_bool(true).is_present());
        assert!(!Existence::from_bool(false).is_present());
        assert!(!Existence::Unspecified.is_present());
    }
}
