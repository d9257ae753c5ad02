//! Parameters for registering and looking up datasets.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::common::{Flag, ProcessMode};
use crate::params::narrowing::NarrowingCondition;
use crate::query::{QueryWriter, ToQuery};
use crate::xml::{child_opt, child_text, decode_or_default, echo_parse, FromXml};

/// Parameters for `postDataset`.
///
/// Sent as a form body. `open_specified` is encoded as `1` (public) or `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDatasetParams {
    /// Id of an existing dataset to update or delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_data_id: Option<String>,

    #[serde(flatten)]
    pub narrowing: NarrowingCondition,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_specified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_mode: Option<ProcessMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_name: Option<String>,
}

impl ToQuery for PostDatasetParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .optional("dataSetId", self.data_set_id.as_deref())
            .optional("statsDataId", self.stats_data_id.as_deref());
        self.narrowing.write_query(writer);
        writer
            .optional("openSpecified", self.open_specified.map(u8::from))
            .optional("processMode", self.process_mode)
            .optional("dataSetName", self.data_set_name.as_deref());
    }
}

impl FromXml for PostDatasetParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        let open_specified = match child_opt(node, "OPEN_SPECIFIED").as_deref() {
            None => None,
            Some("1") => Some(true),
            Some("0") => Some(false),
            Some(other) => {
                tracing::warn!(value = other, "ignoring unrecognised OPEN_SPECIFIED echo");
                None
            }
        };

        Ok(Self {
            data_set_id: child_opt(node, "DATA_SET_ID"),
            stats_data_id: child_opt(node, "STATS_DATA_ID"),
            narrowing: decode_or_default(node, "NARROWING_COND")?,
            open_specified,
            process_mode: echo_parse(node, "PROCESS_MODE"),
            data_set_name: child_opt(node, "DATASET_NAME"),
        })
    }
}

/// Parameters for `refDataset` with a dataset id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefDatasetParams {
    /// Dataset to look up; always sent.
    pub data_set_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
}

impl RefDatasetParams {
    #[must_use]
    pub fn new(data_set_id: impl Into<String>) -> Self {
        Self {
            data_set_id: data_set_id.into(),
            explanation_get_flg: None,
        }
    }
}

impl ToQuery for RefDatasetParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .required("dataSetId", &self.data_set_id)
            .optional("explanationGetFlg", self.explanation_get_flg);
    }
}

impl FromXml for RefDatasetParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            data_set_id: child_text(node, "DATA_SET_ID"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
        })
    }
}

/// Parameters for listing the caller's datasets (`refDataset` without an id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDatasetListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_area: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
}

impl ToQuery for GetDatasetListParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .optional("collectArea", self.collect_area)
            .optional("explanationGetFlg", self.explanation_get_flg);
    }
}

impl FromXml for GetDatasetListParams {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            collect_area: echo_parse(node, "COLLECT_AREA"),
            explanation_get_flg: echo_parse(node, "EXPLANATION_GET_FLG"),
        })
    }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;
    use crate::params::narrowing::Condition;

    #[test]
    fn test_post_dataset_form_fields() {
        let params = PostDatasetParams {
            stats_data_id: Some("0003010900".to_string()),
            narrowing: NarrowingCondition::new()
                .with_area(Condition::level("1"))
                .with_category(1, Condition::range("01", "02")),
            open_specified: Some(true),
            process_mode: Some(ProcessMode::Edit),
            ..Default::default()
        };
        assert_eq!(
            params.to_query().encode(),
            "statsDataId=0003010900&lvArea=1&cdCat01From=01&cdCat01To=02&openSpecified=1&processMode=E"
        );
    }

    #[test]
    fn test_open_specified_false_is_sent() {
        let params = PostDatasetParams {
            open_specified: Some(false),
            ..Default::default()
        };
        assert_eq!(params.to_query().get("openSpecified"), Some("0"));
    }

    #[test]
    fn test_decode_post_dataset_echo() {
        let xml = r#"<PARAMETER>
            <LANG>J</LANG>
            <STATS_DATA_ID>0003010900</STATS_DATA_ID>
            <NARROWING_COND><CODE_CAT02_SELECT>03</CODE_CAT02_SELECT></NARROWING_COND>
            <OPEN_SPECIFIED>1</OPEN_SPECIFIED>
            <PROCESS_MODE>E</PROCESS_MODE>
        </PARAMETER>"#;
        let doc = Document::parse(xml).unwrap();
        let params = PostDatasetParams::from_xml(doc.root_element()).unwrap();

        assert_eq!(params.stats_data_id.as_deref(), Some("0003010900"));
        assert_eq!(params.open_specified, Some(true));
        assert_eq!(params.process_mode, Some(ProcessMode::Edit));
        assert_eq!(params.narrowing.category(2), Some(&Condition::code("03")));
    }

    #[test]
    fn test_decode_open_specified_ignores_other_values() {
        let doc = Document::parse(
            "<PARAMETER><STATS_DATA_ID>0003010900</STATS_DATA_ID>\
             <OPEN_SPECIFIED>yes</OPEN_SPECIFIED><PROCESS_MODE>E</PROCESS_MODE></PARAMETER>",
        )
        .unwrap();
        let params = PostDatasetParams::from_xml(doc.root_element()).unwrap();

        assert_eq!(params.open_specified, None);
        assert_eq!(params.stats_data_id.as_deref(), Some("0003010900"));
        assert_eq!(params.process_mode, Some(ProcessMode::Edit));
    }

    #[test]
    fn test_default_params_encode_only_required_fields() {
        assert!(PostDatasetParams::default().to_query().is_empty());
        assert!(GetDatasetListParams::default().to_query().is_empty());
        assert_eq!(
            RefDatasetParams::new("CTCdemo-kokusei1")
                .to_query()
                .names()
                .collect::<Vec<_>>(),
            vec!["dataSetId"]
        );
    }

    #[test]
    fn test_ref_and_list_queries() {
        assert_eq!(
            RefDatasetParams::new("CTCdemo-kokusei1").to_query().encode(),
            "dataSetId=CTCdemo-kokusei1"
        );
        let list = GetDatasetListParams {
            collect_area: Some(1),
            explanation_get_flg: Some(Flag::No),
        };
        assert_eq!(list.to_query().encode(), "collectArea=1&explanationGetFlg=N");
    }
}
