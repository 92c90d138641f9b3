//! Booth exchange format.
//!
//! Booth configurations travel between nodes as a JSON array of
//! `{"key": .., "value": .., "details": [..]}` objects.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::booth::config_structure::ConfigItem;

/// Malformed exchange format data.
#[derive(Debug, Error)]
#[error("invalid booth exchange format: {0}")]
pub struct ExchangeFormatError(#[from] serde_json::Error);

/// Converts configuration items into the exchange format.
///
/// # Examples
///
/// ```
/// use hacfg::booth::{exchange, ConfigItem};
/// use serde_json::json;
///
/// let items = vec![ConfigItem::new("site", "1.1.1.1")];
/// assert_eq!(
///     exchange::to_exchange_format(&items),
///     json!([{"key": "site", "value": "1.1.1.1", "details": []}])
/// );
/// ```
#[must_use]
pub fn to_exchange_format(items: &[ConfigItem]) -> Value {
    Value::Array(items.iter().map(item_to_value).collect())
}

fn item_to_value(item: &ConfigItem) -> Value {
    serde_json::json!({
        "key": item.key(),
        "value": item.value(),
        "details": to_exchange_format(item.details()),
    })
}

/// Converts exchange format data back into configuration items.
///
/// # Errors
///
/// Returns [`ExchangeFormatError`] if the data is not an array of items, an
/// item lacks `key` or `value`, or has fields other than `key`, `value` and
/// `details`.
pub fn from_exchange_format(data: &Value) -> Result<Vec<ConfigItem>, ExchangeFormatError> {
    Ok(Vec::<ConfigItem>::deserialize(data)?)
}
