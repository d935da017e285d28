use crc32fast::Hasher;

use super::model::ColorEntry;

const FIELD_SEPARATOR: u8 = 0x1F;
const RECORD_SEPARATOR: u8 = 0x1E;
const ABSENT: u8 = 0x00;

fn update_optional(hasher: &mut Hasher, value: Option<&str>) {
    match value {
        Some(text) => hasher.update(text.as_bytes()),
        None => hasher.update(&[ABSENT]),
    }
    hasher.update(&[FIELD_SEPARATOR]);
}

/// Compute CRC32 of catalog contents in order.
pub fn compute_catalog_crc32(entries: &[ColorEntry]) -> u32 {
    let mut hasher = Hasher::new();
    for entry in entries {
        hasher.update(entry.hex().as_bytes());
        hasher.update(&[FIELD_SEPARATOR]);
        update_optional(&mut hasher, entry.name());
        update_optional(&mut hasher, entry.family());
        for tag in entry.tags() {
            hasher.update(tag.as_bytes());
            hasher.update(&[FIELD_SEPARATOR]);
        }
        hasher.update(&[RECORD_SEPARATOR]);
    }
    hasher.finalize()
}
