//! Wire types for the platform seller API.
//!
//! The platform speaks a form-encoded REST dialect whose JSON is loosely
//! typed: numeric ids arrive as numbers or strings, booleans as `1`/`"1"`/
//! `"Yes"`, and the image gallery in two legacy shapes. Every field here is
//! deserialized leniently so one sloppy row never sinks a whole response.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Response envelope wrapping every platform endpoint.
///
/// `status == 1` means success; anything else is a server-reported
/// rejection with an optional human-readable `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Success sentinel (`1` = success).
    #[serde(default, deserialize_with = "de::lenient_int")]
    pub status: i64,
    /// Server-provided message, surfaced verbatim on failure.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, present on success.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the server reported success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 1
    }
}

/// A `{ id, name }` row shared by the simple reference lists (brands,
/// colors, sizes, materials, patterns, units, countries, tags, taxes,
/// warranties).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRow {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: String,
}

/// A dynamic attribute definition row.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeRow {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: String,
    /// `text` or `select` (any case).
    #[serde(default, rename = "type", deserialize_with = "de::lenient_string")]
    pub input_type: String,
    /// Comma-separated category ids this attribute applies to.
    #[serde(default, rename = "category_ids", deserialize_with = "de::lenient_string")]
    pub category_ids: String,
    /// Comma-separated option values, only meaningful for `select`.
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub values: String,
}

/// A persisted image reference on the wire.
///
/// Normalized from both legacy gallery shapes (objects carrying
/// `image_url`/`url`, or bare URL strings); bare strings have no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImageDto {
    pub id: String,
    pub url: String,
}

/// A product variant row on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantDto {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub id: String,
    /// `packet` or `loose` (any case); missing means packet.
    #[serde(default, rename = "type", deserialize_with = "de::lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub measurement: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub material_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub weight: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub height: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub discounted_price: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub unit_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub color_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub pattern_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub capacity: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub mattress_size: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub pack: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub size_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub no_of_pics: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub dimensions: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub flavour: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub stock: String,
    #[serde(default, deserialize_with = "de::gallery")]
    pub images: Vec<GalleryImageDto>,
}

/// A product on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDto {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub category_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub tax_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub brand_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub warranty_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub accessories_warranty_id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::lenient_string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub return_status: bool,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub cancelable_status: bool,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub cod_allowed: bool,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub is_unlimited_stock: bool,
    /// Specification values keyed by attribute id.
    #[serde(default, deserialize_with = "de::lenient_string_map")]
    pub product_attributes: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub main_image: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub main_image_id: String,
    #[serde(default, deserialize_with = "de::gallery")]
    pub other_images: Vec<GalleryImageDto>,
    #[serde(default)]
    pub variants: Vec<VariantDto>,
    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub(crate) mod de {
    //! Lenient deserializers for the loosely-typed wire.

    use super::{BTreeMap, DateTime, Deserialize, Deserializer, GalleryImageDto, NaiveDateTime, Utc};
    use serde_json::Value;

    fn value_to_string(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
            other => other.to_string(),
        }
    }

    /// String field that may arrive as a number, bool, or null.
    pub fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().map(value_to_string).unwrap_or_default())
    }

    /// Integer field that may arrive as a string or bool.
    pub fn lenient_int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(b),
            _ => 0,
        })
    }

    /// Boolean flag that may arrive as `1`, `"1"`, `"Yes"`, or `true`.
    pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => tradewind_core::YesNo::parse_lossy(&s).as_bool(),
            _ => false,
        })
    }

    /// List of strings that may arrive as an array or a comma-separated
    /// string. Empty entries are dropped.
    pub fn lenient_string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Array(items)) => items
                .iter()
                .map(value_to_string)
                .filter(|s| !s.trim().is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        })
    }

    /// String-to-string map with lenient values; non-object input is empty.
    pub fn lenient_string_map<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect(),
            _ => BTreeMap::new(),
        })
    }

    /// Timestamp that may arrive as RFC 3339 or `YYYY-MM-DD HH:MM:SS`.
    pub fn lenient_datetime<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        let Some(Value::String(s)) = value else {
            return Ok(None);
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        Ok(NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc()))
    }

    fn gallery_entry(value: &Value) -> Option<GalleryImageDto> {
        match value {
            Value::String(url) if !url.trim().is_empty() => Some(GalleryImageDto {
                id: String::new(),
                url: url.clone(),
            }),
            Value::Object(map) => {
                let url = map
                    .get("image_url")
                    .or_else(|| map.get("url"))
                    .map(value_to_string)
                    .unwrap_or_default();
                if url.trim().is_empty() {
                    return None;
                }
                let id = map.get("id").map(value_to_string).unwrap_or_default();
                Some(GalleryImageDto { id, url })
            }
            _ => None,
        }
    }

    /// Image gallery in either legacy shape: an array of objects carrying
    /// `image_url`/`url` (and optionally `id`), or a bare array/string of
    /// URLs. Rows without an id keep an empty id.
    pub fn gallery<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<GalleryImageDto>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Array(items)) => items.iter().filter_map(gallery_entry).collect(),
            Some(Value::String(s)) => {
                // A JSON-encoded array smuggled inside a string, or one URL.
                if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&s) {
                    items.iter().filter_map(gallery_entry).collect()
                } else {
                    gallery_entry(&Value::String(s)).into_iter().collect()
                }
            }
            _ => Vec::new(),
        })
    }
}
