//! Values produced by schema mapping

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A mapped section: field name to value, in sorted key order
pub type Record = BTreeMap<String, Value>;

/// A converted field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text passed through unchanged; also the placeholder for absent fields
    Text(String),

    /// Integer value
    Integer(i64),

    /// Floating-point value
    Float(f64),

    /// Local date and time without zone information
    Timestamp(NaiveDateTime),

    /// Signed duration
    Duration(#[serde(serialize_with = "serialize_duration")] TimeDelta),

    /// A single nested section
    Record(Record),

    /// A repeated nested section, in document order
    List(Vec<Record>),
}

fn serialize_duration<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(delta)
}

impl Value {
    /// The empty text placeholder stored for absent optional fields
    pub fn empty() -> Self {
        Value::Text(String::new())
    }

    /// Whether this is the empty text placeholder
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float content, if this is a float value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Timestamp content, if this is a timestamp value
    pub fn as_timestamp(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Duration content, if this is a duration value
    pub fn as_duration(&self) -> Option<&TimeDelta> {
        match self {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }

    /// Nested record, if this is a single section
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Repeated records, if this is a list
    pub fn as_list(&self) -> Option<&[Record]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S")),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Record(r) => write!(f, "{{{} fields}}", r.len()),
            Value::List(items) => write!(f, "[{} records]", items.len()),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<TimeDelta> for Value {
    fn from(value: TimeDelta) -> Self {
        Value::Duration(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2012, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from("CET").as_str(), Some("CET"));
        assert_eq!(Value::from(3_i64).as_i64(), Some(3));
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from(3_i64).as_str(), None);
        assert_eq!(
            Value::from(TimeDelta::minutes(60)).as_duration(),
            Some(&TimeDelta::hours(1))
        );
        assert!(Value::empty().is_empty_text());
        assert!(!Value::from("x").is_empty_text());
    }

    #[test]
    fn test_serialize_scalars_to_json() {
        let mut record = Record::new();
        record.insert("from".to_string(), Value::from(sample_timestamp()));
        record.insert("utcoffsetMinutes".to_string(), Value::from(TimeDelta::minutes(60)));
        record.insert("period".to_string(), Value::from(1_i64));
        record.insert("rise".to_string(), Value::empty());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["from"], "2012-01-01T06:00:00");
        assert_eq!(json["utcoffsetMinutes"], "PT3600S");
        assert_eq!(json["period"], 1);
        assert_eq!(json["rise"], "");
    }

    #[test]
    fn test_serialize_nested_to_yaml() {
        let mut symbol = Record::new();
        symbol.insert("name".to_string(), Value::from("Cloudy"));
        let mut time = Record::new();
        time.insert("symbol".to_string(), Value::Record(symbol));
        let value = Value::List(vec![time.clone(), time]);

        let yaml = serde_yaml::to_string(&value).unwrap();
        assert_eq!(yaml.matches("name: Cloudy").count(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(sample_timestamp()).to_string(), "2012-01-01T06:00:00");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::List(vec![Record::new()]).to_string(), "[1 records]");
    }
}
