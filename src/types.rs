//! Core types shared by all resources
//!
//! The Production API transmits numbers and booleans as strings and timestamps
//! as `YYYY-MM-DD HH:MM:SS`. The [`wire`] helpers accept both the string and the
//! native JSON forms so partially typed responses still decode.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a file resource
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub i64);

impl FileId {
    /// Create a new FileId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Whether the id is unset (the API never issues id 0)
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for FileId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<FileId> for i64 {
    fn from(id: FileId) -> Self {
        id.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        wire::string_int::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        wire::string_int::deserialize(deserializer).map(Self)
    }
}

/// Path of a resource relative to the versioned API root
///
/// Member endpoints with id 0 resolve to the collection path, so an unsaved
/// resource never produces a `.../0` URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    collection: &'static str,
    id: Option<i64>,
}

impl Endpoint {
    /// Endpoint addressing a whole collection (index, store)
    pub const fn collection(collection: &'static str) -> Self {
        Self {
            collection,
            id: None,
        }
    }

    /// Endpoint addressing a single member (show, update, delete)
    pub const fn member(collection: &'static str, id: i64) -> Self {
        Self {
            collection,
            id: Some(id),
        }
    }

    /// Relative path, e.g. `files` or `files/5`
    pub fn path(&self) -> String {
        match self.id {
            Some(id) if id != 0 => format!("{}/{}", self.collection, id),
            _ => self.collection.to_string(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Response of every index (list) call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexResponse<T> {
    /// Total number of matching records
    #[serde(default, with = "wire::string_int")]
    pub count: i64,
    /// URL of the next page, if any
    #[serde(default, deserialize_with = "wire::empty_as_none")]
    pub next: Option<String>,
    /// URL of the previous page, if any
    #[serde(default, deserialize_with = "wire::empty_as_none")]
    pub prev: Option<String>,
    /// Records on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for IndexResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            prev: None,
            data: Vec::new(),
        }
    }
}

impl<T> IndexResponse<T> {
    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Serde helpers for the Production API's loosely typed JSON
pub mod wire {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Timestamp format used by the API
    pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
    }

    /// Used with `skip_serializing_if` to omit unset ids
    pub fn is_zero(value: &i64) -> bool {
        *value == 0
    }

    /// Integers sent as strings (`"5"`), native numbers, `""` or `null` (as 0)
    pub mod string_int {
        use super::*;
        use serde::de::Error as _;

        /// Serialize as a decimal string
        pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&value.to_string())
        }

        /// Deserialize from string or number
        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
            match Option::<Scalar>::deserialize(deserializer)? {
                None => Ok(0),
                Some(Scalar::Int(i)) => Ok(i),
                Some(Scalar::Float(f)) if f.fract() == 0.0 => Ok(f as i64),
                Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(0),
                Some(Scalar::Str(s)) => s
                    .trim()
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid integer {:?}", s))),
                Some(Scalar::Bool(_)) | Some(Scalar::Float(_)) => {
                    Err(D::Error::custom("expected an integer"))
                }
            }
        }
    }

    /// Floats sent as strings (`"1.5"`) or native numbers
    pub mod string_float {
        use super::*;
        use serde::de::Error as _;

        /// Serialize as a native number
        pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_f64(*value)
        }

        /// Deserialize from string or number
        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            match Option::<Scalar>::deserialize(deserializer)? {
                None => Ok(0.0),
                Some(Scalar::Int(i)) => Ok(i as f64),
                Some(Scalar::Float(f)) => Ok(f),
                Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(0.0),
                Some(Scalar::Str(s)) => s
                    .trim()
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid number {:?}", s))),
                Some(Scalar::Bool(_)) => Err(D::Error::custom("expected a number")),
            }
        }
    }

    /// Booleans sent as `"1"`/`"0"`, `"true"`/`"false"`, numbers or native booleans
    pub mod flag {
        use super::*;
        use serde::de::Error as _;

        /// Serialize as `"1"` or `"0"`
        pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(if *value { "1" } else { "0" })
        }

        /// Deserialize from any of the accepted forms
        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
            match Option::<Scalar>::deserialize(deserializer)? {
                None => Ok(false),
                Some(Scalar::Bool(b)) => Ok(b),
                Some(Scalar::Int(i)) => Ok(i != 0),
                Some(Scalar::Float(f)) => Ok(f != 0.0),
                Some(Scalar::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
                    "" | "0" | "false" => Ok(false),
                    "1" | "true" => Ok(true),
                    other => Err(D::Error::custom(format!("invalid boolean {:?}", other))),
                },
            }
        }
    }

    /// Optional timestamps; `""`, `null` and the zero date decode as `None`
    pub mod time {
        use super::*;
        use serde::de::Error as _;

        /// Serialize in the API's timestamp format
        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(t) => serializer.serialize_str(&t.format(TIME_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize from the API's timestamp format
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") | Some("0000-00-00 00:00:00") => Ok(None),
                Some(s) => NaiveDateTime::parse_from_str(s, TIME_FORMAT)
                    .map(Some)
                    .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", s, e))),
            }
        }
    }

    /// Optional strings where `""` means absent
    pub fn empty_as_none<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(default, with = "wire::string_int")]
        amount: i64,
        #[serde(default, with = "wire::flag")]
        active: bool,
        #[serde(
            default,
            with = "wire::time",
            skip_serializing_if = "Option::is_none"
        )]
        created_at: Option<NaiveDateTime>,
        #[serde(default, with = "wire::string_float")]
        width: f64,
    }

    #[test]
    fn file_id_accepts_string_and_number() {
        let a: FileId = serde_json::from_str(r#""42""#).unwrap();
        let b: FileId = serde_json::from_str("42").unwrap();
        assert_eq!(a, FileId(42));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""42""#);
    }

    #[test]
    fn file_id_rejects_garbage() {
        assert!(serde_json::from_str::<FileId>(r#""abc""#).is_err());
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::collection("files").path(), "files");
        assert_eq!(Endpoint::member("files", 5).path(), "files/5");
        assert_eq!(Endpoint::member("files", 0).path(), "files");
    }

    #[test]
    fn loosely_typed_fields_decode() {
        let sample: Sample = serde_json::from_str(
            r#"{"amount":"12","active":"1","created_at":"2017-06-01 13:45:00","width":"148.5"}"#,
        )
        .unwrap();
        assert_eq!(sample.amount, 12);
        assert!(sample.active);
        assert_eq!(
            sample.created_at.unwrap().format(wire::TIME_FORMAT).to_string(),
            "2017-06-01 13:45:00"
        );
        assert_eq!(sample.width, 148.5);
    }

    #[test]
    fn empty_and_null_values_fall_back_to_defaults() {
        let sample: Sample =
            serde_json::from_str(r#"{"amount":"","active":null,"created_at":"","width":null}"#)
                .unwrap();
        assert_eq!(sample.amount, 0);
        assert!(!sample.active);
        assert!(sample.created_at.is_none());
        assert_eq!(sample.width, 0.0);

        let sample: Sample =
            serde_json::from_str(r#"{"created_at":"0000-00-00 00:00:00"}"#).unwrap();
        assert!(sample.created_at.is_none());
    }

    #[test]
    fn flag_serializes_as_digit_string() {
        let sample = Sample {
            amount: 3,
            active: true,
            created_at: None,
            width: 1.0,
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["amount"], "3");
        assert_eq!(json["active"], "1");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn invalid_timestamp_is_an_error() {
        assert!(serde_json::from_str::<Sample>(r#"{"created_at":"yesterday"}"#).is_err());
    }

    #[test]
    fn index_response_treats_empty_links_as_absent() {
        let resp: IndexResponse<FileId> =
            serde_json::from_str(r#"{"count":"2","next":"","prev":null,"data":["1","2"]}"#)
                .unwrap();
        assert_eq!(resp.count, 2);
        assert!(!resp.has_next());
        assert!(resp.prev.is_none());
        assert_eq!(resp.data, vec![FileId(1), FileId(2)]);
    }
}
