//! The `TABLE_INF` element describing one statistics table.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::response::common::CodedName;
use crate::xml::{
    attr_opt, attr_text, child_number, child_opt, child_text, decode_or_default, get_text,
    FromXml,
};

/// Read `{prefix}1` to `{prefix}{count}`; slot `n` lands at index `n - 1`.
///
/// Absent slots before the last present one are `None`; trailing absent
/// slots are dropped.
pub(crate) fn numbered_children(
    node: Node<'_, '_>,
    prefix: &str,
    count: usize,
) -> Vec<Option<String>> {
    let mut slots: Vec<Option<String>> = (1..=count)
        .map(|n| child_opt(node, &format!("{prefix}{n}")))
        .collect();
    while slots.last().is_some_and(Option::is_none) {
        slots.pop();
    }
    slots
}

/// Table title, with the table number from the `no` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    pub name: String,
}

impl FromXml for Title {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            no: attr_opt(node, "no"),
            name: get_text(node),
        })
    }
}

/// Breakdown of the survey name (`STATISTICS_NAME_SPEC`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsNameSpec {
    pub tabulation_category: String,
    /// `TABULATION_SUB_CATEGORY1` to `5` by slot.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tabulation_sub_categories: Vec<Option<String>>,
}

impl FromXml for StatisticsNameSpec {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tabulation_category: child_text(node, "TABULATION_CATEGORY"),
            tabulation_sub_categories: numbered_children(node, "TABULATION_SUB_CATEGORY", 5),
        })
    }
}

/// Explanations of the tabulation categories (`DESCRIPTION`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    pub tabulation_category_explanation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tabulation_sub_category_explanations: Vec<Option<String>>,
}

impl FromXml for Description {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tabulation_category_explanation: child_text(node, "TABULATION_CATEGORY_EXPLANATION"),
            tabulation_sub_category_explanations: numbered_children(
                node,
                "TABULATION_SUB_CATEGORY_EXPLANATION",
                5,
            ),
        })
    }
}

/// Breakdown of the table title (`TITLE_SPEC`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleSpec {
    pub table_category: String,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_explanation: Option<String>,
    /// `TABLE_SUB_CATEGORY1` to `3` by slot.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table_sub_categories: Vec<Option<String>>,
}

impl FromXml for TitleSpec {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            table_category: child_text(node, "TABLE_CATEGORY"),
            table_name: child_text(node, "TABLE_NAME"),
            table_explanation: child_opt(node, "TABLE_EXPLANATION"),
            table_sub_categories: numbered_children(node, "TABLE_SUB_CATEGORY", 3),
        })
    }
}

/// Descriptive record of a statistics table.
///
/// Absent text elements decode as empty strings and absent counts as zero,
/// so a sparse `TABLE_INF` still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableInf {
    /// Statistics table id, e.g. `0003355224`.
    pub id: String,
    pub stat_name: CodedName,
    pub gov_org: CodedName,
    pub statistics_name: String,
    pub title: Title,
    pub cycle: String,
    pub survey_date: String,
    pub open_date: String,
    pub small_area: i32,
    pub collect_area: String,
    pub main_category: CodedName,
    pub sub_category: CodedName,
    pub overall_total_number: u64,
    pub updated_date: String,
    pub statistics_name_spec: StatisticsNameSpec,
    pub description: Description,
    pub title_spec: TitleSpec,
}

impl FromXml for TableInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attr_text(node, "id"),
            stat_name: decode_or_default(node, "STAT_NAME")?,
            gov_org: decode_or_default(node, "GOV_ORG")?,
            statistics_name: child_text(node, "STATISTICS_NAME"),
            title: decode_or_default(node, "TITLE")?,
            cycle: child_text(node, "CYCLE"),
            survey_date: child_text(node, "SURVEY_DATE"),
            open_date: child_text(node, "OPEN_DATE"),
            small_area: child_number(node, "SMALL_AREA")?,
            collect_area: child_text(node, "COLLECT_AREA"),
            main_category: decode_or_default(node, "MAIN_CATEGORY")?,
            sub_category: decode_or_default(node, "SUB_CATEGORY")?,
            overall_total_number: child_number(node, "OVERALL_TOTAL_NUMBER")?,
            updated_date: child_text(node, "UPDATED_DATE"),
            statistics_name_spec: decode_or_default(node, "STATISTICS_NAME_SPEC")?,
            description: decode_or_default(node, "DESCRIPTION")?,
            title_spec: decode_or_default(node, "TITLE_SPEC")?,
        })
    }
}

/// A survey entry from `getStatsList` with `statsNameList=Y` (`LIST_INF`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsNameInf {
    pub id: String,
    pub stat_name: CodedName,
    pub gov_org: CodedName,
}

impl FromXml for StatsNameInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attr_text(node, "id"),
            stat_name: decode_or_default(node, "STAT_NAME")?,
            gov_org: decode_or_default(node, "GOV_ORG")?,
        })
    }
}
