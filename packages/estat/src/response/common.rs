//! Elements shared by every response envelope.

use chrono::{DateTime, FixedOffset};
use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::xml::{attr_text, child_number, child_parse, child_text, child_timestamp, get_text, FromXml};

/// The `RESULT` element: the service's own status for the call.
///
/// A non-zero status is reported here, not as an error; callers decide what
/// to do with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseResult {
    /// 0 on success, 1 when the call succeeded but found no data, 2 when
    /// some parameters were ignored, 100 and above for errors.
    pub status: i32,
    pub error_msg: String,
    pub date: Option<DateTime<FixedOffset>>,
}

impl ResponseResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Status 100 and above means the request was rejected.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status >= 100
    }
}

impl FromXml for ResponseResult {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            status: child_number(node, "STATUS")?,
            error_msg: child_text(node, "ERROR_MSG"),
            date: child_timestamp(node, "DATE")?,
        })
    }
}

/// The `RESULT_INF` element: which slice of the full result was returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultInf {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_number: Option<u64>,
    pub from_number: u64,
    pub to_number: u64,
    /// Start position for the next page; `None` on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key: Option<u64>,
}

impl ResultInf {
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_key.is_some()
    }
}

impl FromXml for ResultInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        let next_key: Option<u64> = child_parse(node, "NEXT_KEY")?;
        Ok(Self {
            total_number: child_parse(node, "TOTAL_NUMBER")?,
            from_number: child_number(node, "FROM_NUMBER")?,
            to_number: child_number(node, "TO_NUMBER")?,
            next_key: next_key.filter(|key| *key != 0),
        })
    }
}

/// An element with a `code` attribute and a name as text, e.g.
/// `<GOV_ORG code="00100">内閣府</GOV_ORG>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodedName {
    pub code: String,
    pub name: String,
}

impl FromXml for CodedName {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            code: attr_text(node, "code"),
            name: get_text(node),
        })
    }
}
