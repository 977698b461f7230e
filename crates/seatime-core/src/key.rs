//! Record key derivation.

/// Derive the ledger key for a record from the holder's name and CDN.
///
/// Only the first space in `name` is removed; any further spaces are kept.
/// No uniqueness check is made against existing storage.
pub fn derive_key(name: &str, cdn: &str) -> String {
  let mut key = name.replacen(' ', "", 1);
  key.push_str(cdn);
  key
}
