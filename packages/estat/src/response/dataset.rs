//! Envelopes for `postDataset` and `refDataset`.
//!
//! `refDataset` answers with `REF_DATASET` when a dataset id was given and
//! with `GET_DATASET_LIST` otherwise, so the two get separate envelopes.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::common::EchoedParameters;
use crate::params::dataset::{GetDatasetListParams, PostDatasetParams, RefDatasetParams};
use crate::params::narrowing::NarrowingCondition;
use crate::response::common::{ResponseResult, ResultInf};
use crate::response::table::TableInf;
use crate::xml::{
    attr_text, child_number, child_text, decode_all, decode_opt, require_child, FromXml,
};

/// Root `POST_DATASET`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDatasetResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<PostDatasetParams>>,
    pub regist_inf: Option<RegistInf>,
}

envelope!(PostDatasetResponse, "POST_DATASET");

impl FromXml for PostDatasetResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            regist_inf: decode_opt(node, "REGIST_INF")?,
        })
    }
}

/// Outcome of a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistInf {
    /// What the service did: `add`, `update` or `delete`.
    pub mode: String,
    pub dataset_id: String,
    pub stats_data_id: String,
    pub public_state: String,
    pub total_number: u64,
}

impl FromXml for RegistInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode: attr_text(node, "mode"),
            dataset_id: child_text(node, "DATASET_ID"),
            stats_data_id: child_text(node, "STATS_DATA_ID"),
            public_state: child_text(node, "PUBLIC_STATE"),
            total_number: child_number(node, "TOTAL_NUMBER")?,
        })
    }
}

/// Root `REF_DATASET`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefDatasetResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<RefDatasetParams>>,
    pub dataset_inf: Option<DatasetInf>,
}

envelope!(RefDatasetResponse, "REF_DATASET");

impl FromXml for RefDatasetResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            dataset_inf: decode_opt(node, "DATASET_INF")?,
        })
    }
}

/// A registered dataset and the table it narrows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetInf {
    pub id: String,
    pub dataset_name: String,
    pub public_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrowing_cond: Option<NarrowingCondition>,
    pub result_inf: Option<ResultInf>,
    pub table_inf: Option<TableInf>,
}

impl FromXml for DatasetInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: attr_text(node, "id"),
            dataset_name: child_text(node, "DATASET_NAME"),
            public_state: child_text(node, "PUBLIC_STATE"),
            narrowing_cond: decode_opt(node, "NARROWING_COND")?,
            result_inf: decode_opt(node, "RESULT_INF")?,
            table_inf: decode_opt(node, "TABLE_INF")?,
        })
    }
}

/// Root `GET_DATASET_LIST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetDatasetListResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<GetDatasetListParams>>,
    pub dataset_list_inf: Option<DatasetListInf>,
}

envelope!(GetDatasetListResponse, "GET_DATASET_LIST");

impl FromXml for GetDatasetListResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            dataset_list_inf: decode_opt(node, "DATASET_LIST_INF")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetListInf {
    pub number: u64,
    pub dataset_infs: Vec<DatasetInf>,
}

impl FromXml for DatasetListInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            number: child_number(node, "NUMBER")?,
            dataset_infs: decode_all(node, "DATASET_INF")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::decode_response;

    #[test]
    fn test_dataset_list_root_is_distinct() {
        let body = "<REF_DATASET><RESULT><STATUS>0</STATUS></RESULT></REF_DATASET>";
        let err = decode_response::<GetDatasetListResponse>(body.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedRoot { expected: "GET_DATASET_LIST", .. }
        ));
    }

    #[test]
    fn test_decode_dataset_inf_with_narrowing() {
        let body = r#"<REF_DATASET>
            <RESULT><STATUS>0</STATUS></RESULT>
            <DATASET_INF id="ds1">
                <DATASET_NAME>sample</DATASET_NAME>
                <NARROWING_COND><CODE_AREA_SELECT>13000</CODE_AREA_SELECT></NARROWING_COND>
                <RESULT_INF><TOTAL_NUMBER>47</TOTAL_NUMBER></RESULT_INF>
            </DATASET_INF>
        </REF_DATASET>"#;
        let response: RefDatasetResponse = decode_response(body.as_bytes()).unwrap();
        let dataset = response.dataset_inf.unwrap();

        assert_eq!(dataset.id, "ds1");
        assert_eq!(
            dataset.narrowing_cond.unwrap().area.code.as_deref(),
            Some("13000")
        );
        assert_eq!(dataset.result_inf.unwrap().total_number, Some(47));
        assert!(dataset.table_inf.is_none());
    }
}
