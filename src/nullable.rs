use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the type's default. `#[serde(default)]` only
/// covers keys that are missing.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
