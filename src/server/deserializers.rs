use serde::{Deserialize, Deserializer};

// query strings come from the frontend as-is; junk like `?page=abc` means the first page
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<i64>().ok()))
}

// the frontend keys categories by object property, so ids arrive either as
// numbers or as numeric strings
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "IntOrString")]
pub struct Inti64(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl TryFrom<IntOrString> for Inti64 {
    type Error = String;

    fn try_from(value: IntOrString) -> Result<Self, Self::Error> {
        match value {
            IntOrString::Int(v) => Ok(Inti64(v)),
            IntOrString::Str(s) => match s.trim().parse::<i64>() {
                Ok(v) => Ok(Inti64(v)),
                Err(_) => Err(format!("Wrong value {s}, can not parse to i64")),
            },
        }
    }
}

impl From<Inti64> for i64 {
    fn from(value: Inti64) -> Self {
        value.0
    }
}

// stored fields keep whatever the client sent; whether it fits the column is
// decided when the record is built, not when the body is parsed
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LenientInt {
    Int(Inti64),
    Other(serde_json::Value),
}

impl LenientInt {
    pub fn into_i64(self) -> Result<i64, serde_json::Value> {
        match self {
            LenientInt::Int(v) => Ok(v.0),
            LenientInt::Other(value) => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default, deserialize_with = "deserialize_lenient_page")]
        page: Option<i64>,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let ids: Vec<Inti64> = serde_json::from_str(r#"[3, "4", " 5 "]"#).unwrap();
        assert_eq!(ids, vec![Inti64(3), Inti64(4), Inti64(5)]);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Inti64>(r#""sports""#).is_err());
        assert!(serde_json::from_str::<Inti64>("1.5").is_err());
    }

    #[test]
    fn lenient_int_keeps_non_numeric_values() {
        let values: Vec<LenientInt> = serde_json::from_str(r#"[2, "3", "hard", 1.5]"#).unwrap();
        let values: Vec<_> = values.into_iter().map(LenientInt::into_i64).collect();
        assert_eq!(
            values,
            vec![
                Ok(2),
                Ok(3),
                Err(serde_json::json!("hard")),
                Err(serde_json::json!(1.5)),
            ]
        );
    }

    #[test]
    fn unparsable_page_is_none() {
        let query: PageQuery = serde_json::from_str(r#"{"page": "abc"}"#).unwrap();
        assert_eq!(query.page, None);
        let query: PageQuery = serde_json::from_str(r#"{"page": "2"}"#).unwrap();
        assert_eq!(query.page, Some(2));
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, None);
    }
}
