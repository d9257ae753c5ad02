//! Query-string and form encoding for request parameters.
//!
//! Parameter records describe their wire fields explicitly through a
//! [`QueryWriter`]: `required` fields are always emitted, `optional` fields
//! are dropped when unset or when they render to an empty string. The result
//! is an ordered [`Query`] that transports encode as a URL query string or as
//! an `application/x-www-form-urlencoded` body.

use std::fmt::Display;

/// Ordered list of `(wire name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first pair with the given wire name.
    ///
    /// # Arguments
    /// * `name` - Wire name, e.g. `statsDataId`
    ///
    /// # Returns
    /// The value as sent, or `None` if the field was omitted
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Wire names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append all pairs of `other` after the pairs of `self`.
    #[must_use]
    pub fn merged(mut self, other: Query) -> Self {
        self.pairs.extend(other.pairs);
        self
    }

    /// Percent-encode as `a=1&b=2`.
    ///
    /// # Examples
    /// ```
    /// use estat_client::query::QueryWriter;
    ///
    /// let mut writer = QueryWriter::new();
    /// writer.required("appId", "abc").optional("searchWord", Some("人口 推計"));
    /// assert_eq!(
    ///     writer.finish().encode(),
    ///     "appId=abc&searchWord=%E4%BA%BA%E5%8F%A3+%E6%8E%A8%E8%A8%88"
    /// );
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Collects wire fields while applying the omission policy.
#[derive(Debug, Default)]
pub struct QueryWriter {
    query: Query,
}

impl QueryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a field unconditionally, even when it renders empty.
    ///
    /// # Arguments
    /// * `name` - Wire name
    /// * `value` - Anything with a `Display` rendering
    ///
    /// # Returns
    /// The writer, for chaining
    pub fn required(&mut self, name: impl Into<String>, value: impl Display) -> &mut Self {
        self.query.pairs.push((name.into(), value.to_string()));
        self
    }

    /// Emit a field only if it is set and not empty.
    ///
    /// Zero is a value: `Some(0)` is sent as `0`.
    ///
    /// # Arguments
    /// * `name` - Wire name
    /// * `value` - `None` to omit the field
    ///
    /// # Returns
    /// The writer, for chaining
    ///
    /// # Examples
    /// ```
    /// use estat_client::query::QueryWriter;
    ///
    /// let mut writer = QueryWriter::new();
    /// writer
    ///     .optional("surveyYears", None::<&str>)
    ///     .optional("searchWord", Some(""))
    ///     .optional("startPosition", Some(0u32));
    /// assert_eq!(writer.finish().encode(), "startPosition=0");
    /// ```
    pub fn optional<V: Display>(&mut self, name: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let rendered = value.to_string();
            if !rendered.is_empty() {
                self.query.pairs.push((name.into(), rendered));
            }
        }
        self
    }

    #[must_use]
    pub fn finish(self) -> Query {
        self.query
    }
}

/// Implemented by every record that can be sent as request parameters.
///
/// # Examples
/// ```
/// use estat_client::params::RefDatasetParams;
/// use estat_client::query::ToQuery;
///
/// let query = RefDatasetParams::new("CTCdemo-kokusei1").to_query();
/// assert_eq!(query.get("dataSetId"), Some("CTCdemo-kokusei1"));
/// assert_eq!(query.get("explanationGetFlg"), None);
/// ```
pub trait ToQuery {
    /// Write this record's fields in wire order.
    fn write_query(&self, writer: &mut QueryWriter);

    /// Encode this record on its own.
    fn to_query(&self) -> Query {
        let mut writer = QueryWriter::new();
        self.write_query(&mut writer);
        writer.finish()
    }
}
