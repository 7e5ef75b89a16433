use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or_else(first_page))
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> i64 {
        serde_json::from_value::<PageQuery>(serde_json::from_str(query).unwrap())
            .unwrap()
            .page
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(parse("{}"), 1);
        assert_eq!(parse(r#"{"page": "nope"}"#), 1);
    }

    #[test]
    fn page_is_coerced_to_integer() {
        assert_eq!(parse(r#"{"page": "3"}"#), 3);
        assert_eq!(parse(r#"{"page": "-2"}"#), -2);
    }
}
