use crate::error::DocumentError;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Number;
use std::fmt;

/// A single value in a parsed OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiItem {
    Object(ApiObject),
    Array(Vec<ApiItem>),
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl ApiItem {
    #[must_use]
    pub const fn as_object(&self) -> Option<&ApiObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[ApiItem]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, for error messages
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
        }
    }
}

impl From<&str> for ApiItem {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ApiItem {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ApiObject> for ApiItem {
    fn from(value: ApiObject) -> Self {
        Self::Object(value)
    }
}

impl From<serde_json::Value> for ApiItem {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// An object whose keys keep the order they were parsed in.
///
/// Keys are unique. Traversal and diagnostic paths depend on this order, so
/// it is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiObject {
    entries: Vec<(String, ApiItem)>,
}

impl ApiObject {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ApiItem> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a value, replacing an existing entry in place.
    ///
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: ApiItem) -> Option<ApiItem> {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ApiItem)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ApiItem)> for ApiObject {
    fn from_iter<I: IntoIterator<Item = (K, ApiItem)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// A whole OpenAPI document. The root is always an object.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSpec {
    root: ApiItem,
}

impl ApiSpec {
    pub fn new(root: ApiItem) -> Result<Self, DocumentError> {
        match root {
            ApiItem::Object(_) => Ok(Self { root }),
            other => Err(DocumentError::RootNotObject {
                found: other.type_name(),
            }),
        }
    }

    /// The root object as an [`ApiItem`], for use with [`crate::query`]
    #[must_use]
    pub const fn root(&self) -> &ApiItem {
        &self.root
    }

    /// Top-level properties in document order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ApiItem)> {
        self.root.as_object().into_iter().flat_map(ApiObject::iter)
    }
}

impl TryFrom<serde_json::Value> for ApiSpec {
    type Error = DocumentError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::new(ApiItem::from(value))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl<'de> Deserialize<'de> for ApiItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ApiItemVisitor;

        impl<'de> Visitor<'de> for ApiItemVisitor {
            type Value = ApiItem;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON or YAML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ApiItem::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ApiItem::Number(value.into()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(ApiItem::Number(value.into()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Number::from_f64(value)
                    .map(ApiItem::Number)
                    .ok_or_else(|| E::custom(format!("non-finite number: {value}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ApiItem::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ApiItem::String(value))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(ApiItem::Null)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ApiItem::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                ApiItem::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(ApiItem::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut object = ApiObject::new();
                while let Some(ObjectKey(key)) = map.next_key()? {
                    let value: ApiItem = map.next_value()?;
                    object.insert(key, value);
                }
                Ok(ApiItem::Object(object))
            }
        }

        deserializer.deserialize_any(ApiItemVisitor)
    }
}

/// A mapping key. YAML allows scalar keys of any type (`200:`, `true:`);
/// they are stored in their string form.
struct ObjectKey(String);

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectKeyVisitor;

        impl Visitor<'_> for ObjectKeyVisitor {
            type Value = ObjectKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar mapping key")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ObjectKey(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ObjectKey(value))
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ObjectKey(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ObjectKey(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(ObjectKey(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ObjectKey(value.to_string()))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ObjectKey("null".to_string()))
            }
        }

        deserializer.deserialize_any(ObjectKeyVisitor)
    }
}

impl Serialize for ApiItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Object(object) => object.serialize(serializer),
            Self::Array(items) => serializer.collect_seq(items),
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for ApiObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ApiSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let root = ApiItem::deserialize(deserializer)?;
        Self::new(root).map_err(de::Error::custom)
    }
}

impl Serialize for ApiSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}
