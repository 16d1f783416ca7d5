use std::sync::LazyLock;

use convert_case::{Boundary, Case, Converter};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// How object keys in a success body are rewritten before decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Keys are used exactly as sent
    #[default]
    Preserve,
    /// `userId` / `user-id` become `user_id`
    SnakeCase,
    /// `user_id` / `user-id` become `userId`
    CamelCase,
}

/// Word boundaries for key conversion; digits stay attached to their word
const KEY_BOUNDARIES: [Boundary; 5] = [
    Boundary::UNDERSCORE,
    Boundary::HYPHEN,
    Boundary::SPACE,
    Boundary::LOWER_UPPER,
    Boundary::ACRONYM,
];

static TO_SNAKE: LazyLock<Converter> =
    LazyLock::new(|| Converter::new().set_boundaries(&KEY_BOUNDARIES).to_case(Case::Snake));

static TO_CAMEL: LazyLock<Converter> =
    LazyLock::new(|| Converter::new().set_boundaries(&KEY_BOUNDARIES).to_case(Case::Camel));

impl KeyStrategy {
    fn convert(self, key: &str) -> String {
        let converter = match self {
            Self::Preserve => return key.to_owned(),
            Self::SnakeCase => &*TO_SNAKE,
            Self::CamelCase => &*TO_CAMEL,
        };

        // leading and trailing underscores are part of the name (`_id`)
        let core = key.trim_matches('_');
        if core.is_empty() {
            return key.to_owned();
        }
        let prefix = &key[..key.len() - key.trim_start_matches('_').len()];
        let suffix = &key[key.trim_end_matches('_').len()..];

        format!("{prefix}{}{suffix}", converter.convert(core))
    }
}

/// JSON decoding options for success bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    #[serde(default, rename = "key_strategy")]
    pub keys: KeyStrategy,
}

impl DecoderConfig {
    #[must_use]
    pub const fn with_keys(mut self, keys: KeyStrategy) -> Self {
        self.keys = keys;
        self
    }

    /// Decode a JSON body into `T`
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, DecodeError> {
        if self.keys == KeyStrategy::Preserve {
            return Ok(serde_json::from_slice(body)?);
        }

        let value: Value = serde_json::from_slice(body)?;
        Ok(serde_json::from_value(rewrite_keys(value, self.keys)?)?)
    }
}

fn rewrite_keys(value: Value, keys: KeyStrategy) -> Result<Value, DecodeError> {
    match value {
        Value::Object(map) => {
            let mut rewritten = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let converted = keys.convert(&key);
                if rewritten.contains_key(&converted) {
                    return Err(DecodeError::DuplicateKey { key: converted });
                }
                rewritten.insert(converted, rewrite_keys(value, keys)?);
            }
            Ok(Value::Object(rewritten))
        }
        Value::Array(items) => Ok(Value::Array(
            items
                .into_iter()
                .map(|item| rewrite_keys(item, keys))
                .collect::<Result<_, _>>()?,
        )),
        other => Ok(other),
    }
}
