use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::db::CategorySelector;

// clients send the category either as a number or as the string taken from a <select>
pub fn deserialize_category_selector<'de, D>(deserializer: D) -> Result<CategorySelector, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_number_from_string::<i64, D>(deserializer).map(CategorySelector::from)
}

/// Query values that are not integers read as absent, so the handler's default applies.
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
