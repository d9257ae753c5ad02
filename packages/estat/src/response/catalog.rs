//! Envelope for `getDataCatalog`.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::catalog::GetDataCatalogParams;
use crate::params::common::EchoedParameters;
use crate::response::common::{CodedName, ResponseResult, ResultInf};
use crate::response::table::{numbered_children, Description, TitleSpec};
use crate::xml::{
    attr_text, child_number, child_opt, child_text, decode_all, decode_opt, decode_or_default,
    find_children, require_child, FromXml,
};

/// Root `GET_DATA_CATALOG`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetDataCatalogResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<GetDataCatalogParams>>,
    pub data_catalog_list_inf: Option<DataCatalogListInf>,
}

envelope!(GetDataCatalogResponse, "GET_DATA_CATALOG");

impl FromXml for GetDataCatalogResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            data_catalog_list_inf: decode_opt(node, "DATA_CATALOG_LIST_INF")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataCatalogListInf {
    pub number: u64,
    pub result_inf: Option<ResultInf>,
    pub data_catalog_infs: Vec<DataCatalogInf>,
}

impl FromXml for DataCatalogListInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            number: child_number(node, "NUMBER")?,
            result_inf: decode_opt(node, "RESULT_INF")?,
            data_catalog_infs: decode_all(node, "DATA_CATALOG_INF")?,
        })
    }
}

/// A catalog entry: one dataset and its downloadable resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataCatalogInf {
    pub id: String,
    pub dataset: Option<Dataset>,
    /// Every `RESOURCE` under the entry's `RESOURCES` elements, in document
    /// order.
    pub resources: Vec<Resource>,
}

impl FromXml for DataCatalogInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        let mut resources = Vec::new();
        for group in find_children(node, "RESOURCES") {
            resources.extend(decode_all::<Resource>(group, "RESOURCE")?);
        }

        Ok(Self {
            id: attr_text(node, "id"),
            dataset: decode_opt(node, "DATASET")?,
            resources,
        })
    }
}

/// Title of a catalog dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetTitle {
    pub name: String,
    pub tabulation_category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tabulation_sub_categories: Vec<Option<String>>,
    pub cycle: String,
    pub survey_date: String,
    pub collect_area: String,
}

impl FromXml for DatasetTitle {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: child_text(node, "NAME"),
            tabulation_category: child_text(node, "TABULATION_CATEGORY"),
            tabulation_sub_categories: numbered_children(node, "TABULATION_SUB_CATEGORY", 5),
            cycle: child_text(node, "CYCLE"),
            survey_date: child_text(node, "SURVEY_DATE"),
            collect_area: child_text(node, "COLLECT_AREA"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub stat_name: CodedName,
    pub organization: CodedName,
    pub title: DatasetTitle,
    pub description: Description,
    pub publisher: String,
    pub contact_point: String,
    pub creator: String,
    pub release_date: String,
    pub last_modified_date: String,
    pub frequency_of_update: String,
    pub landing_page: String,
}

impl FromXml for Dataset {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            stat_name: decode_or_default(node, "STAT_NAME")?,
            organization: decode_or_default(node, "ORGANIZATION")?,
            title: decode_or_default(node, "TITLE")?,
            description: decode_or_default(node, "DESCRIPTION")?,
            publisher: child_text(node, "PUBLISHER"),
            contact_point: child_text(node, "CONTACT_POINT"),
            creator: child_text(node, "CREATOR"),
            release_date: child_text(node, "RELEASE_DATE"),
            last_modified_date: child_text(node, "LAST_MODIFIED_DATE"),
            frequency_of_update: child_text(node, "FREQUENCY_OF_UPDATE"),
            landing_page: child_text(node, "LANDING_PAGE"),
        })
    }
}

/// Title of a resource. The table breakdown fields sit directly under
/// `TITLE`, next to `NAME` and `TABLE_NO`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceTitle {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_no: Option<String>,
    #[serde(flatten)]
    pub spec: TitleSpec,
}

impl FromXml for ResourceTitle {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: child_text(node, "NAME"),
            table_no: child_opt(node, "TABLE_NO"),
            spec: TitleSpec::from_xml(node)?,
        })
    }
}

/// A downloadable file or database view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: String,
    pub title: ResourceTitle,
    pub url: String,
    #[serde(flatten)]
    pub description: Description,
    pub format: String,
    pub release_date: String,
    pub last_modified_date: String,
    pub resource_licence_id: String,
    pub language: String,
}

impl FromXml for Resource {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attr_text(node, "id"),
            title: decode_or_default(node, "TITLE")?,
            url: child_text(node, "URL"),
            description: Description::from_xml(node)?,
            format: child_text(node, "FORMAT"),
            release_date: child_text(node, "RELEASE_DATE"),
            last_modified_date: child_text(node, "LAST_MODIFIED_DATE"),
            resource_licence_id: child_text(node, "RESOURCE_LICENCE_ID"),
            language: child_text(node, "LANGUAGE"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::decode_response;

    #[test]
    fn test_resources_across_groups() {
        let body = r#"<GET_DATA_CATALOG>
            <RESULT><STATUS>0</STATUS></RESULT>
            <DATA_CATALOG_LIST_INF>
                <NUMBER>1</NUMBER>
                <DATA_CATALOG_INF id="000001120179">
                    <RESOURCES>
                        <RESOURCE id="r1"><FORMAT>XLS</FORMAT></RESOURCE>
                        <RESOURCE id="r2"><FORMAT>CSV</FORMAT></RESOURCE>
                    </RESOURCES>
                    <RESOURCES>
                        <RESOURCE id="r3"><TITLE><NAME>n</NAME><TABLE_NO>5</TABLE_NO></TITLE></RESOURCE>
                    </RESOURCES>
                </DATA_CATALOG_INF>
            </DATA_CATALOG_LIST_INF>
        </GET_DATA_CATALOG>"#;
        let response: GetDataCatalogResponse = decode_response(body.as_bytes()).unwrap();
        let entry = &response.data_catalog_list_inf.unwrap().data_catalog_infs[0];

        let ids: Vec<&str> = entry.resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
        assert_eq!(entry.resources[2].title.table_no.as_deref(), Some("5"));
        assert!(entry.dataset.is_none());
    }
}
