//! Parameters for the table list, metadata and data operations.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::common::Flag;
use crate::params::narrowing::NarrowingCondition;
use crate::query::{QueryWriter, ToQuery};
use crate::xml::{child_opt, child_text, decode_or_default, echo_parse, FromXml};

/// Filters for `getStatsList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatsListParams {
    /// Survey period, `yyyy`, `yyyymm` or `yyyymm-yyyymm`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_years: Option<String>,

    /// Publication period, same format as `survey_years`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_years: Option<String>,

    /// Statistics field code (2 digits for a major, 4 for a minor field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_field: Option<String>,

    /// Government statistics code (5 digits for an organisation, 8 for a
    /// survey).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_word: Option<String>,

    /// 1: statistics tables, 2: regional mesh, 3: community statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_kind: Option<u8>,

    /// 1: nationwide, 2: prefecture, 3: municipality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_area: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,

    /// `Y` lists survey names instead of tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_name_list: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

impl ToQuery for GetStatsListParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .optional("surveyYears", self.survey_years.as_deref())
            .optional("openYears", self.open_years.as_deref())
            .optional("statsField", self.stats_field.as_deref())
            .optional("statsCode", self.stats_code.as_deref())
            .optional("searchWord", self.search_word.as_deref())
            .optional("searchKind", self.search_kind)
            .optional("collectArea", self.collect_area)
            .optional("explanationGetFlg", self.explanation_get_flg)
            .optional("statsNameList", self.stats_name_list)
            .optional("startPosition", self.start_position)
            .optional("limit", self.limit)
            .optional("updatedDate", self.updated_date.as_deref());
    }
}

impl FromXml for GetStatsListParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            survey_years: child_opt(node, "SURVEY_YEARS"),
            open_years: child_opt(node, "OPEN_YEARS"),
            stats_field: child_opt(node, "STATS_FIELD"),
            stats_code: child_opt(node, "STATS_CODE"),
            search_word: child_opt(node, "SEARCH_WORD"),
            search_kind: echo_parse(node, "SEARCH_KIND"),
            collect_area: echo_parse(node, "COLLECT_AREA"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
            stats_name_list: echo_parse(node, "STATS_NAME_LIST"),
            start_position: echo_parse(node, "START_POSITION"),
            limit: echo_parse(node, "LIMIT"),
            updated_date: child_opt(node, "UPDATED_DATE"),
        })
    }
}

/// Parameters for `getMetaInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMetaInfoParams {
    /// Table id; always sent.
    pub stats_data_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
}

impl GetMetaInfoParams {
    #[must_use]
    pub fn new(stats_data_id: impl Into<String>) -> Self {
        Self {
            stats_data_id: stats_data_id.into(),
            explanation_get_flg: None,
        }
    }
}

impl ToQuery for GetMetaInfoParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .required("statsDataId", &self.stats_data_id)
            .optional("explanationGetFlg", self.explanation_get_flg);
    }
}

impl FromXml for GetMetaInfoParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            stats_data_id: child_text(node, "STATS_DATA_ID"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
        })
    }
}

/// Parameters for `getStatsData`.
///
/// Either `stats_data_id` or `data_set_id` identifies the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatsDataParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_data_id: Option<String>,

    #[serde(flatten)]
    pub narrowing: NarrowingCondition,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_get_flg: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnt_get_flg: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_get_flg: Option<Flag>,

    /// Replacement for special characters: 0 none, 1 zero, 2 NULL, 3 NA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_sp_char: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_header_flg: Option<u8>,
}

impl GetStatsDataParams {
    /// Request a table by its statistics table id.
    #[must_use]
    pub fn for_table(stats_data_id: impl Into<String>) -> Self {
        Self {
            stats_data_id: Some(stats_data_id.into()),
            ..Self::default()
        }
    }

    /// Request the table referenced by a registered dataset.
    #[must_use]
    pub fn for_dataset(data_set_id: impl Into<String>) -> Self {
        Self {
            data_set_id: Some(data_set_id.into()),
            ..Self::default()
        }
    }
}

impl ToQuery for GetStatsDataParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .optional("dataSetId", self.data_set_id.as_deref())
            .optional("statsDataId", self.stats_data_id.as_deref());
        self.narrowing.write_query(writer);
        writer
            .optional("startPosition", self.start_position)
            .optional("limit", self.limit)
            .optional("metaGetFlg", self.meta_get_flg)
            .optional("cntGetFlg", self.cnt_get_flg)
            .optional("explanationGetFlg", self.explanation_get_flg)
            .optional("annotationGetFlg", self.annotation_get_flg)
            .optional("replaceSpChar", self.replace_sp_char)
            .optional("sectionHeaderFlg", self.section_header_flg);
    }
}

impl FromXml for GetStatsDataParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            data_set_id: child_opt(node, "DATA_SET_ID"),
            stats_data_id: child_opt(node, "STATS_DATA_ID"),
            narrowing: decode_or_default(node, "NARROWING_COND")?,
            start_position: echo_parse(node, "START_POSITION"),
            limit: echo_parse(node, "LIMIT"),
            meta_get_flg: echo_parse(node, "METAGET_FLG"),
            cnt_get_flg: echo_parse(node, "CNT_GET_FLG"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
            annotation_get_flg: echo_parse(node, "ANNOTATION_GET_FLG"),
            replace_sp_char: echo_parse(node, "REPLACE_SP_CHAR"),
            section_header_flg: echo_parse(node, "SECTION_HEADER_FLG"),
        })
    }
}

/// Batch-level switches for `getStatsDatas`; these travel in the query
/// string while the per-table specs go in the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatsDatasParams {
    /// Dataset whose narrowing applies to every table in the batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_get_flg: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_get_flg: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_sp_char: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_header_flg: Option<u8>,
}

impl ToQuery for GetStatsDatasParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .optional("metaGetFlg", self.meta_get_flg)
            .optional("explanationGetFlg", self.explanation_get_flg)
            .optional("annotationGetFlg", self.annotation_get_flg)
            .optional("replaceSpChar", self.replace_sp_char)
            .optional("sectionHeaderFlg", self.section_header_flg)
            .optional("dataSetId", self.data_set_id.as_deref());
    }
}

impl FromXml for GetStatsDatasParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            data_set_id: child_opt(node, "DATA_SET_ID"),
            meta_get_flg: echo_parse(node, "META_GET_FLG"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
            annotation_get_flg: echo_parse(node, "ANNOTATION_GET_FLG"),
            replace_sp_char: echo_parse(node, "REPLACE_SP_CHAR"),
            section_header_flg: echo_parse(node, "SECTION_HEADER_FLG"),
        })
    }
}

/// One table in a batch request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDatasSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stats_data_id: String,

    #[serde(flatten)]
    pub narrowing: NarrowingCondition,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl StatsDatasSpec {
    #[must_use]
    pub fn new(stats_data_id: impl Into<String>) -> Self {
        Self {
            stats_data_id: stats_data_id.into(),
            ..Self::default()
        }
    }

    /// Restrict to `limit` records starting at `start_position` (1-based).
    #[must_use]
    pub fn with_window(mut self, start_position: u32, limit: u32) -> Self {
        self.start_position = Some(start_position);
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_narrowing(mut self, narrowing: NarrowingCondition) -> Self {
        self.narrowing = narrowing;
        self
    }
}

impl FromXml for StatsDatasSpec {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            stats_data_id: child_text(node, "STATS_DATA_ID"),
            narrowing: decode_or_default(node, "NARROWING_COND")?,
            start_position: echo_parse(node, "START_POSITION"),
            limit: echo_parse(node, "LIMIT"),
        })
    }
}
