//! XML helpers for navigating response documents and reading typed fields.
//!
//! The service omits elements rather than sending them empty, so the readers
//! here treat an absent element and an empty one alike: strings become empty
//! (or `None`), integers become zero (or `None`). Malformed integers and
//! timestamps in the payload are errors. Echoed request parameters are read
//! with [`echo_parse`], which logs and drops values it does not recognise.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use roxmltree::{Document, Node};

use crate::error::DecodeError;

/// Types that decode from a single element.
pub trait FromXml: Sized {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError>;
}

/// Parse a raw response body.
///
/// An empty body is rejected by the XML parser ("root element not found").
pub fn parse_document(body: &[u8]) -> Result<Document<'_>, DecodeError> {
    let text = std::str::from_utf8(body)?;
    Ok(Document::parse(text)?)
}

/// Return the root element if its tag matches `expected`.
pub fn expect_root<'a, 'input>(
    doc: &'a Document<'input>,
    expected: &'static str,
) -> Result<Node<'a, 'input>, DecodeError> {
    let root = doc.root_element();
    if get_tag_name(root) == expected {
        Ok(root)
    } else {
        Err(DecodeError::UnexpectedRoot {
            expected,
            found: get_tag_name(root).to_string(),
        })
    }
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use estat_client::xml::get_tag_name;
///
/// let doc = Document::parse("<GET_STATS_LIST><RESULT/></GET_STATS_LIST>").unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "GET_STATS_LIST");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use estat_client::xml::find_child;
///
/// let doc = Document::parse("<GET_STATS_LIST><RESULT/><PARAMETER/></GET_STATS_LIST>").unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "RESULT").is_some());
/// assert!(find_child(root, "DATALIST_INF").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// Iterator over matching child elements, in document order
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use estat_client::xml::find_children;
///
/// let xml = r#"<CLASS_OBJ id="cat01"><CLASS code="1"/><CLASS code="2"/><EXPLANATION/></CLASS_OBJ>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert_eq!(find_children(doc.root_element(), "CLASS").count(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find a required child element.
pub fn require_child<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> Result<Node<'a, 'input>, DecodeError> {
    find_child(node, tag).ok_or_else(|| DecodeError::MissingElement {
        element: tag,
        context: get_tag_name(node).to_string(),
    })
}

/// Get the text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Text of a child element, or an empty string when it is absent.
///
/// # Arguments
/// * `node` - Parent node
/// * `tag` - Tag name of the child
///
/// # Returns
/// Trimmed text of the first matching child, `""` if there is none
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use estat_client::xml::child_text;
///
/// let doc = Document::parse("<RESULT><ERROR_MSG> ok </ERROR_MSG></RESULT>").unwrap();
/// assert_eq!(child_text(doc.root_element(), "ERROR_MSG"), "ok");
/// assert_eq!(child_text(doc.root_element(), "DATE"), "");
/// ```
pub fn child_text(node: Node<'_, '_>, tag: &str) -> String {
    find_child(node, tag).map(get_text).unwrap_or_default()
}

/// Text of a child element, `None` when absent or empty.
pub fn child_opt(node: Node<'_, '_>, tag: &str) -> Option<String> {
    Some(child_text(node, tag)).filter(|s| !s.is_empty())
}

/// Attribute value, or an empty string when it is absent.
pub fn attr_text(node: Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

/// Attribute value, `None` when absent or empty.
pub fn attr_opt(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a child element with `FromStr`.
///
/// # Arguments
/// * `node` - Parent node
/// * `tag` - Tag name of the child
///
/// # Returns
/// `Ok(None)` when the child is absent or empty, `Ok(Some(value))` when it
/// parses, and `DecodeError::InvalidValue` otherwise
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use estat_client::xml::child_parse;
///
/// let doc = Document::parse("<RESULT_INF><NEXT_KEY>3</NEXT_KEY></RESULT_INF>").unwrap();
/// let root = doc.root_element();
///
/// assert_eq!(child_parse::<u64>(root, "NEXT_KEY").unwrap(), Some(3));
/// assert_eq!(child_parse::<u64>(root, "TOTAL_NUMBER").unwrap(), None);
/// ```
pub fn child_parse<T: FromStr>(node: Node<'_, '_>, tag: &str) -> Result<Option<T>, DecodeError> {
    let Some(text) = child_opt(node, tag) else {
        return Ok(None);
    };
    text.parse()
        .map(Some)
        .map_err(|_| DecodeError::InvalidValue {
            element: tag.to_string(),
            value: text,
        })
}

/// Parse an echoed request parameter with `FromStr`.
///
/// The echo only reflects what the service understood, so a value outside
/// the client's domain is logged and read as `None` instead of failing the
/// whole response.
///
/// # Arguments
/// * `node` - The `PARAMETER` element
/// * `tag` - Tag name of the echoed field
///
/// # Returns
/// The parsed value, or `None` when the field is absent, empty or unknown
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use estat_client::params::Flag;
/// use estat_client::xml::echo_parse;
///
/// let doc = Document::parse("<PARAMETER><METAGET_FLG>Y</METAGET_FLG><CNT_GET_FLG>?</CNT_GET_FLG></PARAMETER>").unwrap();
/// let root = doc.root_element();
///
/// assert_eq!(echo_parse::<Flag>(root, "METAGET_FLG"), Some(Flag::Yes));
/// assert_eq!(echo_parse::<Flag>(root, "CNT_GET_FLG"), None);
/// ```
pub fn echo_parse<T: FromStr>(node: Node<'_, '_>, tag: &str) -> Option<T> {
    let text = child_opt(node, tag)?;
    match text.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(element = tag, value = %text, "ignoring unrecognised echoed parameter");
            None
        }
    }
}

/// Parse a numeric child element, zero when absent or empty.
pub fn child_number<T: FromStr + Default>(node: Node<'_, '_>, tag: &str) -> Result<T, DecodeError> {
    Ok(child_parse(node, tag)?.unwrap_or_default())
}

/// Parse an ISO-8601 timestamp with offset, e.g. `2022-10-29T18:20:05.880+09:00`.
pub fn child_timestamp(
    node: Node<'_, '_>,
    tag: &str,
) -> Result<Option<DateTime<FixedOffset>>, DecodeError> {
    let Some(text) = child_opt(node, tag) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&text)
        .map(Some)
        .map_err(|_| DecodeError::InvalidTimestamp {
            element: tag.to_string(),
            value: text,
        })
}

/// Decode an optional child element.
pub fn decode_opt<T: FromXml>(node: Node<'_, '_>, tag: &str) -> Result<Option<T>, DecodeError> {
    find_child(node, tag).map(T::from_xml).transpose()
}

/// Decode an optional child element, falling back to `T::default()`.
pub fn decode_or_default<T: FromXml + Default>(
    node: Node<'_, '_>,
    tag: &str,
) -> Result<T, DecodeError> {
    Ok(decode_opt(node, tag)?.unwrap_or_default())
}

/// Decode every child element with the given tag, in document order.
pub fn decode_all<T: FromXml>(node: Node<'_, '_>, tag: &str) -> Result<Vec<T>, DecodeError> {
    node.children()
        .filter(|child| child.is_element() && get_tag_name(*child) == tag)
        .map(T::from_xml)
        .collect()
}
