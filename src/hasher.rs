use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::record::Record;

/// Compute SHA-256 hash of a byte slice.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Fingerprint of a parsed table. Covers the data types too, so a changed
/// classification table yields a new hash for the same report text.
pub fn hash_records(records: &[Record]) -> Result<String> {
    Ok(hash_bytes(&serde_json::to_vec(records)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_bytes_deterministic() {
        let h1 = hash_bytes(b"hello world");
        let h2 = hash_bytes(b"hello world");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64); // SHA-256 hex is 64 chars
    }

    #[test]
    fn hash_bytes_different_for_different_input() {
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
    }

    #[test]
    fn hash_records_sees_data_type_changes() {
        let a = vec![Record::new("Memory", "", "Size", "16 GB", "SPMemoryDataType")];
        let b = vec![Record::new("Memory", "", "Size", "16 GB", "")];
        assert_eq!(hash_records(&a).unwrap(), hash_records(&a).unwrap());
        assert_ne!(hash_records(&a).unwrap(), hash_records(&b).unwrap());
    }
}
