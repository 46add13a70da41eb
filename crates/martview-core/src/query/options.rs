//! Module: query::options
//! Responsibility: copy-on-write request option maps.
//! Does not own: request modes, endpoint encoding, or list metadata.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// OptionValue
///
/// One filter/sort value as carried in `request_options`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Uint(u64),
    Int(i64),
    Bool(bool),
    Text(String),
    List(Vec<Self>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }

                Ok(())
            }
        }
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u64> for OptionValue {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<EntityId> for OptionValue {
    fn from(id: EntityId) -> Self {
        Self::Uint(id.get())
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

///
/// RequestOptions
///
/// Filter and sort keys sent with every list request. Every update returns a
/// new map; an existing map is never mutated through a shared reference.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestOptions(BTreeMap<String, OptionValue>);

impl RequestOptions {
    pub const OFFSET: &'static str = "offset";
    pub const LIMIT: &'static str = "limit";
    pub const ALIKE: &'static str = "alike";
    pub const ORDERING: &'static str = "ordering";

    /// Keys that only make sense inside an expanded group.
    pub const GROUP_KEYS: [&'static str; 2] = [Self::ALIKE, Self::OFFSET];

    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Offset carried by these options, if it is a non-negative integer.
    #[must_use]
    pub fn offset(&self) -> Option<u32> {
        match self.get(Self::OFFSET)? {
            OptionValue::Uint(v) => u32::try_from(*v).ok(),
            OptionValue::Int(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn alike(&self) -> Option<EntityId> {
        match self.get(Self::ALIKE)? {
            OptionValue::Uint(v) => Some(EntityId::new(*v)),
            _ => None,
        }
    }

    /// Copy with `offset` replaced.
    #[must_use]
    pub fn with_offset(&self, offset: u32) -> Self {
        RequestOptionsBuilder::from_options(self)
            .offset(offset)
            .build()
    }

    /// Copy with one key set.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        RequestOptionsBuilder::from_options(self)
            .set(key, value)
            .build()
    }

    /// Copy without `alike` and `offset`: the ungrouped filter baseline.
    #[must_use]
    pub fn without_group_keys(&self) -> Self {
        Self::GROUP_KEYS
            .iter()
            .fold(RequestOptionsBuilder::from_options(self), |b, key| {
                b.remove(key)
            })
            .build()
    }

    /// Copy with every key of `delta` written over these options.
    #[must_use]
    pub fn merged(&self, delta: &Self) -> Self {
        RequestOptionsBuilder::from_options(self).merge(delta).build()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

///
/// RequestOptionsBuilder
///
/// Fluent builder over an owned copy of a base option map.
///

#[derive(Clone, Debug, Default)]
pub struct RequestOptionsBuilder {
    options: BTreeMap<String, OptionValue>,
}

impl RequestOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_options(base: &RequestOptions) -> Self {
        Self {
            options: base.0.clone(),
        }
    }

    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn offset(self, offset: u32) -> Self {
        self.set(RequestOptions::OFFSET, offset)
    }

    #[must_use]
    pub fn alike(self, group_id: EntityId) -> Self {
        self.set(RequestOptions::ALIKE, group_id)
    }

    #[must_use]
    pub fn remove(mut self, key: &str) -> Self {
        self.options.remove(key);
        self
    }

    #[must_use]
    pub fn merge(mut self, delta: &RequestOptions) -> Self {
        for (key, value) in &delta.0 {
            self.options.insert(key.clone(), value.clone());
        }
        self
    }

    #[must_use]
    pub fn build(self) -> RequestOptions {
        RequestOptions(self.options)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> RequestOptions {
        [
            ("terms", OptionValue::List(vec![3u64.into(), 9u64.into()])),
            ("ordering", "-created_at".into()),
            ("offset", 40u32.into()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn with_offset_leaves_source_untouched() {
        let base = filters();
        let next = base.with_offset(50);

        assert_eq!(base.offset(), Some(40));
        assert_eq!(next.offset(), Some(50));
        assert_eq!(next.get("terms"), base.get("terms"));
    }

    #[test]
    fn without_group_keys_drops_alike_and_offset_only() {
        let grouped = filters().with(RequestOptions::ALIKE, EntityId::new(77));
        let baseline = grouped.without_group_keys();

        assert!(grouped.contains(RequestOptions::ALIKE));
        assert!(!baseline.contains(RequestOptions::ALIKE));
        assert!(!baseline.contains(RequestOptions::OFFSET));
        assert_eq!(baseline.len(), 2);
    }

    #[test]
    fn merged_overwrites_existing_keys() {
        let delta: RequestOptions = [("ordering", "name")].into_iter().collect();
        let merged = filters().merged(&delta);

        assert_eq!(merged.get("ordering"), Some(&OptionValue::Text("name".into())));
        assert_eq!(merged.offset(), Some(40));
    }

    #[test]
    fn untagged_values_decode_from_json() {
        let options: RequestOptions = serde_json::from_str(
            r#"{"offset": 20, "alike": 5, "terms": [1, 2], "ordering": "name", "flag": true}"#,
        )
        .expect("options should decode");

        assert_eq!(options.offset(), Some(20));
        assert_eq!(options.alike(), Some(EntityId::new(5)));
        assert_eq!(options.get("terms").map(ToString::to_string).as_deref(), Some("1,2"));
        assert_eq!(options.get("flag"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn negative_offset_is_not_an_offset() {
        let options: RequestOptions = [("offset", OptionValue::Int(-10))].into_iter().collect();

        assert_eq!(options.offset(), None);
    }
}
