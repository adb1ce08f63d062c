//! Shared key generation for blob lookups.

use uuid::Uuid;

/// Storage key of a document blob: `content/{shard}/{guid}/file`.
pub fn blob_key(guid: &Uuid) -> String {
    let guid = guid.as_hyphenated().to_string();
    format!("content/{}/{}/file", &guid[..2], guid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_key_is_sharded_and_lowercase() {
        let guid = Uuid::parse_str("AB12CD34-0000-4000-8000-000000000001").unwrap();
        assert_eq!(
            blob_key(&guid),
            "content/ab/ab12cd34-0000-4000-8000-000000000001/file"
        );
    }
}
