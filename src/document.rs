use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;
use std::{fmt, fs, path::Path};

use crate::{conv::encode, share::ShareSet, Error};

/// The reserved entry carrying the informational `n` and `k` fields.
pub const METADATA_KEY: &str = "keys";

/// Informational parameters of the sharing, never used to select shares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// Total number of shares dealt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
    /// Declared reconstruction threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<u64>,
}

impl Metadata {
    /// Picks `n` and `k` out of an arbitrary metadata value, dropping any field
    /// that is not a non-negative integer.
    pub fn from_value(value: &Value) -> Self {
        Self {
            n: count_field(value, "n"),
            k: count_field(value, "k"),
        }
    }
}

fn count_field(value: &Value, field: &str) -> Option<u64> {
    let raw = value.get(field)?;
    let count = raw.as_u64();
    if count.is_none() {
        tracing::debug!(field, value = %raw, "ignoring metadata field");
    }
    count
}

/// A share value as written in the document: a numeral and its radix, both strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncodedShare {
    pub base: String,
    pub value: String,
}

/// A parsed share document.
///
/// Entries keep their document order, and a key repeated in the source appears
/// twice so that the collector can reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareDocument {
    pub metadata: Option<Metadata>,
    pub entries: Vec<(String, EncodedShare)>,
}

impl ShareDocument {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a document from a JSON file.
    pub fn import<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(data.as_slice())?)
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes every share of `shares` in `base`, keyed by its x coordinate.
    pub fn encode(shares: &ShareSet, base: u32, threshold: Option<u64>) -> Result<Self, Error> {
        let mut entries = Vec::with_capacity(shares.len());
        for share in shares {
            let value = encode(base, &share.y)?;
            entries.push((
                share.x.to_string(),
                EncodedShare {
                    base: base.to_string(),
                    value,
                },
            ));
        }
        Ok(Self {
            metadata: Some(Metadata {
                n: Some(shares.len() as u64),
                k: threshold,
            }),
            entries,
        })
    }
}

impl Serialize for ShareDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.entries.len() + usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(metadata) = &self.metadata {
            map.serialize_entry(METADATA_KEY, metadata)?;
        }
        for (key, share) in &self.entries {
            map.serialize_entry(key, share)?;
        }
        map.end()
    }
}

struct ShareDocumentVisitor;

impl<'de> Visitor<'de> for ShareDocumentVisitor {
    type Value = ShareDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of share entries")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut document = ShareDocument::default();
        while let Some(key) = access.next_key::<String>()? {
            if key == METADATA_KEY {
                let value: Value = access.next_value()?;
                document.metadata = Some(Metadata::from_value(&value));
            } else {
                let share: EncodedShare = access.next_value()?;
                document.entries.push((key, share));
            }
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for ShareDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ShareDocumentVisitor)
    }
}
