//! The `DATA_INF` element: notes, annotations and the data values.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::narrowing::CATEGORY_AXES;
use crate::xml::{attr_opt, attr_text, decode_all, get_text, FromXml};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataInf {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    pub values: Vec<Value>,
}

impl FromXml for DataInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            notes: decode_all(node, "NOTE")?,
            annotations: decode_all(node, "ANNOTATION")?,
            values: decode_all(node, "VALUE")?,
        })
    }
}

/// Meaning of a special character used in place of a value, e.g. `-` or `***`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Note {
    pub char: String,
    pub text: String,
}

impl FromXml for Note {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            char: attr_text(node, "char"),
            text: get_text(node),
        })
    }
}

/// Annotation text keyed by the symbol referenced from `Value::annotation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub annotation: String,
    pub text: String,
}

impl FromXml for Annotation {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            annotation: attr_text(node, "annotation"),
            text: get_text(node),
        })
    }
}

/// One cell of the table. The axis attributes hold class codes from the
/// matching `CLASS_OBJ`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Value {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    /// `cat01` to `cat15`; index 0 is `cat01`.
    pub categories: [Option<String>; CATEGORY_AXES],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Cell text as sent; may be a special character rather than a number.
    pub value: String,
}

impl Value {
    /// Code on category axis `axis` (1-based).
    #[must_use]
    pub fn category(&self, axis: usize) -> Option<&str> {
        axis.checked_sub(1)
            .and_then(|i| self.categories.get(i))
            .and_then(Option::as_deref)
    }

    /// The value as a number, `None` for special characters such as `-`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.replace(',', "").parse().ok()
    }
}

impl FromXml for Value {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        let categories =
            std::array::from_fn(|i| attr_opt(node, &format!("cat{:02}", i + 1)));
        Ok(Self {
            tab: attr_opt(node, "tab"),
            categories,
            area: attr_opt(node, "area"),
            time: attr_opt(node, "time"),
            unit: attr_opt(node, "unit"),
            annotation: attr_opt(node, "annotation"),
            value: get_text(node),
        })
    }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    #[test]
    fn test_decode_data_inf() {
        let xml = r#"<DATA_INF>
            <NOTE char="***">該当数字がないもの</NOTE>
            <ANNOTATION annotation="†">暫定値</ANNOTATION>
            <VALUE tab="11" cat01="13" cat03="1" time="2021000103" unit="10億円">139,210.8</VALUE>
            <VALUE tab="11" cat01="14" time="2021000103" annotation="†">***</VALUE>
        </DATA_INF>"#;
        let doc = Document::parse(xml).unwrap();
        let data = DataInf::from_xml(doc.root_element()).unwrap();

        assert_eq!(data.notes[0].char, "***");
        assert_eq!(data.annotations[0].annotation, "†");
        assert_eq!(data.values.len(), 2);

        let first = &data.values[0];
        assert_eq!(first.tab.as_deref(), Some("11"));
        assert_eq!(first.category(1), Some("13"));
        assert_eq!(first.category(2), None);
        assert_eq!(first.category(3), Some("1"));
        assert_eq!(first.area, None);
        assert_eq!(first.as_f64(), Some(139_210.8));

        let second = &data.values[1];
        assert_eq!(second.annotation.as_deref(), Some("†"));
        assert_eq!(second.as_f64(), None);
    }

    #[test]
    fn test_category_out_of_range() {
        let value = Value::default();
        assert_eq!(value.category(0), None);
        assert_eq!(value.category(16), None);
    }
}
