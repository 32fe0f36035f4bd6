//! Composite identifier for a remotely stored object.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A `(bucket, key)` pair identifying one remote object.
///
/// Immutable once constructed; a change to either component is a different
/// object and triggers a fresh fetch. Used as the cache key for request
/// coalescing, so it is `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        ObjectRef {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_bucket_and_key() {
        let object = ObjectRef::new("media", "clip1");
        assert_eq!(object.to_string(), "media/clip1");
    }

    #[test]
    fn test_identity_is_componentwise() {
        assert_eq!(ObjectRef::new("a", "b"), ObjectRef::new("a", "b"));
        assert_ne!(ObjectRef::new("a", "b"), ObjectRef::new("a", "c"));
        assert_ne!(ObjectRef::new("a", "b"), ObjectRef::new("c", "b"));
    }
}
