use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A product grouping known at build time. See [`crate::catalog::CATEGORIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Asset name of the category icon; resolved by the rendering surface.
    pub icon_ref: &'static str,
}

impl Category {
    /// Key used by the product service: the id, lower-cased.
    pub fn service_key(&self) -> String {
        self.id.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A product as returned by `GET /categorias/{category}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(rename = "imagen")]
    pub image_url: String,
    #[serde(rename = "disponible", deserialize_with = "lenient::flag")]
    pub available: bool,
    #[serde(rename = "categoria_id")]
    pub category_id: u64,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

impl Product {
    /// Price formatted with two decimals, e.g. `$45.50`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Backends serialize decimals, booleans and dates in more than one way;
/// accept the common encodings and reject values that break invariants.
mod lenient {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }

    pub(super) fn price<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let value = match NumberOrText::deserialize(d)? {
            NumberOrText::Number(n) => n,
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid price {s:?}")))?,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(D::Error::custom(format!(
                "price must be a non-negative number, got {value}"
            )));
        }
        Ok(value)
    }

    pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match BoolOrInt::deserialize(d)? {
            BoolOrInt::Bool(b) => Ok(b),
            BoolOrInt::Int(0) => Ok(false),
            BoolOrInt::Int(1) => Ok(true),
            BoolOrInt::Int(n) => Err(D::Error::custom(format!("invalid flag {n}"))),
        }
    }

    pub(super) fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}")))
    }

    pub(super) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(precio: &str, disponible: &str, created_at: &str) -> String {
        format!(
            r#"{{
                "id": 7,
                "nombre": "Capuccino",
                "precio": {precio},
                "imagen": "https://cdn.example.com/capuccino.jpg",
                "disponible": {disponible},
                "categoria_id": 1,
                "created_at": {created_at},
                "updated_at": "2024-05-02T08:30:00.000000Z"
            }}"#
        )
    }

    #[test]
    fn decodes_wire_names() {
        let p: Product =
            serde_json::from_str(&sample("45.5", "true", "\"2024-05-01T12:00:00Z\"")).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.name, "Capuccino");
        assert_eq!(p.price, 45.5);
        assert!(p.available);
        assert_eq!(p.category_id, 1);
        assert_eq!(p.description, None);
        assert_eq!(p.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(p.display_price(), "$45.50");
    }

    #[test]
    fn accepts_string_price_integer_flag_and_sql_timestamp() {
        let p: Product =
            serde_json::from_str(&sample("\"30.00\"", "0", "\"2024-05-01 12:00:00\"")).unwrap();
        assert_eq!(p.price, 30.0);
        assert!(!p.available);
        assert_eq!(p.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn rejects_negative_price() {
        let res = serde_json::from_str::<Product>(&sample("-1", "true", "\"2024-05-01T12:00:00Z\""));
        assert!(res.is_err());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let res = serde_json::from_str::<Product>(&sample("1", "true", "\"yesterday\""));
        assert!(res.is_err());
    }

    #[test]
    fn service_key_is_lowercase_id() {
        let c = Category {
            id: "Pasteles",
            display_name: "Pastel",
            icon_ref: "icono_pastel.png",
        };
        assert_eq!(c.service_key(), "pasteles");
    }
}
