//! The `CLASS_INF` element: the classification axes of a table and their
//! codes.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::xml::{attr_opt, attr_text, decode_all, get_text, FromXml};

/// All classification objects of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassInf {
    pub class_objs: Vec<ClassObj>,
}

impl ClassInf {
    /// Look up an axis by id (`tab`, `time`, `area`, `cat01`, ...).
    #[must_use]
    pub fn class_obj(&self, id: &str) -> Option<&ClassObj> {
        self.class_objs.iter().find(|obj| obj.id == id)
    }
}

impl FromXml for ClassInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            class_objs: decode_all(node, "CLASS_OBJ")?,
        })
    }
}

/// One classification axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassObj {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub classes: Vec<Class>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explanations: Vec<Explanation>,
}

impl ClassObj {
    #[must_use]
    pub fn class(&self, code: &str) -> Option<&Class> {
        self.classes.iter().find(|class| class.code == code)
    }

    /// Codes whose `parentCode` is `parent_code`, in document order.
    pub fn children_of<'a>(&'a self, parent_code: &'a str) -> impl Iterator<Item = &'a Class> {
        self.classes
            .iter()
            .filter(move |class| class.parent_code.as_deref() == Some(parent_code))
    }
}

impl FromXml for ClassObj {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attr_text(node, "id"),
            name: attr_text(node, "name"),
            description: attr_opt(node, "description"),
            classes: decode_all(node, "CLASS")?,
            explanations: decode_all(node, "EXPLANATION")?,
        })
    }
}

/// A code on an axis (`CLASS`), carried entirely in attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Class {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_inf: Option<String>,
}

impl FromXml for Class {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            code: attr_text(node, "code"),
            name: attr_text(node, "name"),
            level: attr_opt(node, "level"),
            unit: attr_opt(node, "unit"),
            parent_code: attr_opt(node, "parentCode"),
            add_inf: attr_opt(node, "addInf"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub id: String,
    pub text: String,
}

impl FromXml for Explanation {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attr_text(node, "id"),
            text: get_text(node),
        })
    }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    const CLASS_INF: &str = r#"<CLASS_INF>
        <CLASS_OBJ id="tab" name="表章項目">
            <CLASS code="11" name="金額" level="" unit="10億円"/>
        </CLASS_OBJ>
        <CLASS_OBJ id="cat01" name="国内総生産(支出側)" description="需要項目">
            <CLASS code="12" name="国内総生産(支出側)" level="1"/>
            <CLASS code="13" name="民間最終消費支出" level="2" parentCode="12"/>
            <CLASS code="14" name="家計最終消費支出" level="3" parentCode="13"/>
            <CLASS code="22" name="民間住宅" level="2" parentCode="12"/>
            <EXPLANATION id="13">家計と対家計民間非営利団体の消費</EXPLANATION>
        </CLASS_OBJ>
    </CLASS_INF>"#;

    #[test]
    fn test_decode_class_inf() {
        let doc = Document::parse(CLASS_INF).unwrap();
        let inf = ClassInf::from_xml(doc.root_element()).unwrap();

        assert_eq!(inf.class_objs.len(), 2);
        let tab = inf.class_obj("tab").unwrap();
        assert_eq!(tab.description, None);
        let amount = tab.class("11").unwrap();
        assert_eq!(amount.unit.as_deref(), Some("10億円"));
        assert_eq!(amount.level, None);

        let cat01 = inf.class_obj("cat01").unwrap();
        assert_eq!(cat01.description.as_deref(), Some("需要項目"));
        assert_eq!(cat01.explanations[0].id, "13");
        assert_eq!(cat01.explanations[0].text, "家計と対家計民間非営利団体の消費");
    }

    #[test]
    fn test_children_of() {
        let doc = Document::parse(CLASS_INF).unwrap();
        let inf = ClassInf::from_xml(doc.root_element()).unwrap();
        let cat01 = inf.class_obj("cat01").unwrap();

        let children: Vec<&str> = cat01.children_of("12").map(|c| c.code.as_str()).collect();
        assert_eq!(children, vec!["13", "22"]);
        assert_eq!(cat01.children_of("99").count(), 0);
    }
}
