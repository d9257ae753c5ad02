//! Parameters for `getDataCatalog`.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::common::Flag;
use crate::query::{QueryWriter, ToQuery};
use crate::xml::{child_opt, echo_parse, FromXml};

/// Filters for the data catalog (downloadable files and database tables).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataCatalogParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_years: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_years: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_word: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_area: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,

    /// File format filter: `XLS`, `CSV`, `PDF`, `XML`, `XLS_REP` or `DB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

impl ToQuery for GetDataCatalogParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .optional("surveyYears", self.survey_years.as_deref())
            .optional("openYears", self.open_years.as_deref())
            .optional("statsField", self.stats_field.as_deref())
            .optional("statsCode", self.stats_code.as_deref())
            .optional("searchWord", self.search_word.as_deref())
            .optional("collectArea", self.collect_area)
            .optional("explanationGetFlg", self.explanation_get_flg)
            .optional("dataType", self.data_type.as_deref())
            .optional("startPosition", self.start_position)
            .optional("catalogId", self.catalog_id.as_deref())
            .optional("resourceId", self.resource_id.as_deref())
            .optional("limit", self.limit)
            .optional("updatedDate", self.updated_date.as_deref());
    }
}

impl FromXml for GetDataCatalogParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            survey_years: child_opt(node, "SURVEY_YEARS"),
            open_years: child_opt(node, "OPEN_YEARS"),
            stats_field: child_opt(node, "STATS_FIELD"),
            stats_code: child_opt(node, "STATS_CODE"),
            search_word: child_opt(node, "SEARCH_WORD"),
            collect_area: echo_parse(node, "COLLECT_AREA"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
            data_type: child_opt(node, "DATA_TYPE"),
            start_position: echo_parse(node, "START_POSITION"),
            catalog_id: child_opt(node, "CATALOG_ID"),
            resource_id: child_opt(node, "RESOURCE_ID"),
            limit: echo_parse(node, "LIMIT"),
            updated_date: child_opt(node, "UPDATED_DATE"),
        })
    }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    #[test]
    fn test_catalog_query_keeps_leading_zeros() {
        let params = GetDataCatalogParams {
            stats_code: Some("00200521".to_string()),
            catalog_id: Some("000001120179".to_string()),
            data_type: Some("XLS".to_string()),
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(
            params.to_query().encode(),
            "statsCode=00200521&dataType=XLS&catalogId=000001120179&limit=1"
        );
    }

    #[test]
    fn test_default_catalog_params_encode_nothing() {
        assert!(GetDataCatalogParams::default().to_query().is_empty());
    }

    #[test]
    fn test_decode_catalog_echo() {
        let doc = Document::parse(
            "<PARAMETER><LANG>J</LANG><DATA_TYPE>XLS</DATA_TYPE><LIMIT>1</LIMIT></PARAMETER>",
        )
        .unwrap();
        let params = GetDataCatalogParams::from_xml(doc.root_element()).unwrap();
        assert_eq!(params.data_type.as_deref(), Some("XLS"));
        assert_eq!(params.limit, Some(1));
        assert_eq!(params.catalog_id, None);
    }
}
