//! Case-insensitive field mapping for wire types.
//!
//! Each wire type declares a table of `(wire name, field)` pairs. Keys are
//! matched against the table ignoring ASCII case; keys with no entry are
//! skipped by the caller.

use serde::de::{self, Deserialize, MapAccess};

/// Looks up `key` in a field table, ignoring ASCII case.
pub(crate) fn lookup<F: Copy>(table: &[(&'static str, F)], key: &str) -> Option<F> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, field)| *field)
}

/// Reads the next map value into `slot`, rejecting a second occurrence.
pub(crate) fn fill<'de, T, A>(
    slot: &mut Option<T>,
    map: &mut A,
    name: &'static str,
) -> Result<(), A::Error>
where
    T: Deserialize<'de>,
    A: MapAccess<'de>,
{
    if slot.is_some() {
        return Err(de::Error::duplicate_field(name));
    }
    *slot = Some(map.next_value()?);
    Ok(())
}

/// Unwraps a filled slot or reports the field as missing.
pub(crate) fn require<T, E: de::Error>(slot: Option<T>, name: &'static str) -> Result<T, E> {
    slot.ok_or_else(|| E::missing_field(name))
}
