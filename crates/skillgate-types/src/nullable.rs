//! Serde helper for fields the platform may send as explicit `null`.

use serde::{Deserialize, Deserializer};

/// Deserialises a field, mapping JSON `null` to the type's default.
///
/// `#[serde(default)]` only covers a missing key; pair it with this helper so
/// `null` and absence decode the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
