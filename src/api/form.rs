use url::form_urlencoded;

/// A value that can be appended to a form body.
pub enum FormValue {
    Single(String),
    /// Expands into one `key=value` pair per element.
    Many(Vec<String>),
}

impl From<&str> for FormValue {
    fn from(v: &str) -> Self {
        FormValue::Single(v.to_string())
    }
}

impl From<String> for FormValue {
    fn from(v: String) -> Self {
        FormValue::Single(v)
    }
}

impl From<bool> for FormValue {
    fn from(v: bool) -> Self {
        FormValue::Single(v.to_string())
    }
}

impl From<i64> for FormValue {
    fn from(v: i64) -> Self {
        FormValue::Single(v.to_string())
    }
}

impl From<u64> for FormValue {
    fn from(v: u64) -> Self {
        FormValue::Single(v.to_string())
    }
}

impl From<Vec<String>> for FormValue {
    fn from(v: Vec<String>) -> Self {
        FormValue::Many(v)
    }
}

/// Ordered key/value pairs sent as `application/x-www-form-urlencoded`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(mut self, key: &str, value: impl Into<FormValue>) -> Self {
        match value.into() {
            FormValue::Single(v) => self.pairs.push((key.to_string(), v)),
            FormValue::Many(values) => {
                for v in values {
                    self.pairs.push((key.to_string(), v));
                }
            }
        }
        self
    }

    pub fn append_opt(self, key: &str, value: Option<impl Into<FormValue>>) -> Self {
        match value {
            Some(v) => self.append(key, v),
            None => self,
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_in_insertion_order() {
        let body = FormBody::new()
            .append("organizationId", 42i64)
            .append("event", "pushCode")
            .append("enabled", false);
        assert_eq!(body.encode(), "organizationId=42&event=pushCode&enabled=false");
    }

    #[test]
    fn arrays_expand_to_repeated_keys() {
        let body = FormBody::new().append("event", vec!["push".to_string(), "issues".to_string()]);
        assert_eq!(body.encode(), "event=push&event=issues");
    }

    #[test]
    fn escapes_reserved_characters() {
        let body = FormBody::new().append("organizationName", "acme & co");
        assert_eq!(body.encode(), "organizationName=acme+%26+co");
    }

    #[test]
    fn missing_optional_is_skipped() {
        let body = FormBody::new()
            .append("accessToken", "t")
            .append_opt("hookSecret", None::<String>);
        assert_eq!(body.pairs().len(), 1);
    }
}
