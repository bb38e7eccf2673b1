//! Typed rows returned by the graph store.
//!
//! Missing or `null` properties decode to their defaults (empty string, `0.0`,
//! empty list) so one sparse movie node cannot fail a whole retrieval.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Record, StoreError};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ranked hit from the vector or full-text index. Uniqueness key is `title`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
}

impl ResultItem {
    pub fn new(title: impl Into<String>, overview: impl Into<String>, rating: f64, score: f64) -> Self {
        Self {
            title: title.into(),
            overview: overview.into(),
            rating,
            score,
        }
    }
}

/// A movie expanded through graph traversal: genres, directors, up to 5 actors and
/// up to 3 similar movies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichedMovie {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub directors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub actors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub similar_movies: Vec<String>,
}

/// Node and relationship counts of the movie graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStats {
    #[serde(deserialize_with = "null_as_default")]
    pub movies: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub people: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub relationships: u64,
}

/// Decodes one record (column → value) into a typed row.
pub fn decode_record<T>(record: Record) -> Result<T, StoreError>
where
    T: for<'de> Deserialize<'de>,
{
    Ok(serde_json::from_value(serde_json::Value::Object(record))?)
}

/// Decodes every record, failing on the first malformed one.
pub fn decode_records<T>(records: Vec<Record>) -> Result<Vec<T>, StoreError>
where
    T: for<'de> Deserialize<'de>,
{
    records.into_iter().map(decode_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: serde_json::Value) -> Record {
        match v {
            serde_json::Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    /// **Scenario**: null overview and missing score decode to defaults.
    #[test]
    fn result_item_tolerates_nulls_and_missing_columns() {
        let item: ResultItem =
            decode_record(record(json!({"title": "Heat", "overview": null, "rating": 8.3})))
                .unwrap();
        assert_eq!(item, ResultItem::new("Heat", "", 8.3, 0.0));
    }

    /// **Scenario**: null collections decode to empty lists.
    #[test]
    fn enriched_movie_tolerates_null_lists() {
        let movie: EnrichedMovie = decode_record(record(json!({
            "title": "Heat",
            "overview": "A heist.",
            "rating": 8.3,
            "genres": ["Crime"],
            "directors": null,
            "actors": ["Al Pacino", "Robert De Niro"],
        })))
        .unwrap();
        assert_eq!(movie.genres, vec!["Crime"]);
        assert!(movie.directors.is_empty());
        assert!(movie.similar_movies.is_empty());
    }

    /// **Scenario**: a wrongly typed column is a Decode error, not a panic.
    #[test]
    fn wrong_type_is_decode_error() {
        let err = decode_record::<ResultItem>(record(json!({"title": 42}))).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
