//! crates/sp_io/src/hasher.rs
//!
//! SHA-256 digests for scenario inputs and result documents.
//!
//! - Use `sha256_canonical(..)` for JSON values/structs (goes through canonical_json).
//! - Use `sha256_hex(..)` for raw bytes.
//! - Hex digests are lowercase.

#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::{to_canonical_bytes, to_canonical_json_bytes};
use crate::{IoError, IoResult};

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes(value).map_err(|e| IoError::Hash(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

/// SHA-256 over an already parsed `Value`.
pub fn sha256_canonical_value(v: &Value) -> IoResult<String> {
    let bytes = to_canonical_json_bytes(v).map_err(|e| IoError::Hash(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

/// `RES:<hex>`: content id of a result document from its canonical bytes.
pub fn res_id_from_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(format!("RES:{}", sha256_canonical(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hex_encoding_is_lowercase() {
        let h = sha256_hex(b"abc");
        assert_eq!(h, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn canonical_hashing_ignores_key_order() {
        #[derive(Serialize)]
        struct T {
            b: u32,
            a: u32,
        }
        let h1 = sha256_canonical(&T { b: 2, a: 1 }).unwrap();
        let h2 = sha256_canonical_value(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn res_id_has_prefix_and_full_digest() {
        let id = res_id_from_canonical(&json!({"method": "dhondt"})).unwrap();
        assert!(id.starts_with("RES:"));
        assert_eq!(id.len(), 4 + 64);
    }
}
