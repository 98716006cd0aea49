// src/sink/naming.rs

use sha2::{Digest, Sha256};

const FINGERPRINT_HEX_LEN: usize = 8;

/// Stable short hash of the column list. Columns are joined with the ASCII
/// unit separator so no column name can collide with a boundary.
pub fn header_fingerprint(header: &[String]) -> String {
    let mut h = Sha256::new();
    for (i, col) in header.iter().enumerate() {
        if i > 0 {
            h.update([0x1f]);
        }
        h.update(col.as_bytes());
    }
    let mut s = hex::encode(h.finalize());
    s.truncate(FINGERPRINT_HEX_LEN);
    s
}

/// `<base>_<fingerprint>` when versioned, else `<base>`.
pub fn sheet_title(base: &str, header: &[String], versioned: bool) -> String {
    if versioned {
        format!("{base}_{}", header_fingerprint(header))
    } else {
        base.to_string()
    }
}
