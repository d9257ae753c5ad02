//! Envelopes for `getStatsList`, `getMetaInfo`, `getStatsData` and
//! `getStatsDatas`.

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::params::common::{EchoedParameters, Lang};
use crate::params::stats::{
    GetMetaInfoParams, GetStatsDataParams, GetStatsDatasParams, GetStatsListParams,
    StatsDatasSpec,
};
use crate::response::class::ClassInf;
use crate::response::common::{ResponseResult, ResultInf};
use crate::response::data::DataInf;
use crate::response::table::{StatsNameInf, TableInf};
use crate::xml::{
    attr_text, child_number, decode_all, decode_opt, echo_parse, find_children, require_child,
    FromXml,
};

/// Root `GET_STATS_LIST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetStatsListResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<GetStatsListParams>>,
    pub datalist_inf: Option<DatalistInf>,
}

envelope!(GetStatsListResponse, "GET_STATS_LIST");

impl FromXml for GetStatsListResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            datalist_inf: decode_opt(node, "DATALIST_INF")?,
        })
    }
}

/// Matching tables, or matching surveys when `statsNameList=Y` was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatalistInf {
    /// Total number of matches across all pages.
    pub number: u64,
    pub result_inf: Option<ResultInf>,
    pub table_infs: Vec<TableInf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_infs: Vec<StatsNameInf>,
}

impl FromXml for DatalistInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            number: child_number(node, "NUMBER")?,
            result_inf: decode_opt(node, "RESULT_INF")?,
            table_infs: decode_all(node, "TABLE_INF")?,
            list_infs: decode_all(node, "LIST_INF")?,
        })
    }
}

/// Root `GET_META_INFO`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMetaInfoResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<GetMetaInfoParams>>,
    pub metadata_inf: Option<MetadataInf>,
}

envelope!(GetMetaInfoResponse, "GET_META_INFO");

impl FromXml for GetMetaInfoResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            metadata_inf: decode_opt(node, "METADATA_INF")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataInf {
    pub table_inf: Option<TableInf>,
    pub class_inf: Option<ClassInf>,
}

impl FromXml for MetadataInf {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            table_inf: decode_opt(node, "TABLE_INF")?,
            class_inf: decode_opt(node, "CLASS_INF")?,
        })
    }
}

/// Root `GET_STATS_DATA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetStatsDataResponse {
    pub result: ResponseResult,
    pub parameter: Option<EchoedParameters<GetStatsDataParams>>,
    pub statistical_data: Option<StatisticalData>,
}

envelope!(GetStatsDataResponse, "GET_STATS_DATA");

impl FromXml for GetStatsDataResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter: decode_opt(node, "PARAMETER")?,
            statistical_data: decode_opt(node, "STATISTICAL_DATA")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticalData {
    pub result_inf: Option<ResultInf>,
    pub table_inf: Option<TableInf>,
    pub class_inf: Option<ClassInf>,
    pub data_inf: Option<DataInf>,
}

impl FromXml for StatisticalData {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result_inf: decode_opt(node, "RESULT_INF")?,
            table_inf: decode_opt(node, "TABLE_INF")?,
            class_inf: decode_opt(node, "CLASS_INF")?,
            data_inf: decode_opt(node, "DATA_INF")?,
        })
    }
}

/// Root `GET_STATS_DATAS`, the batch response.
///
/// Results for each table in the request body are keyed by `requestNo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetStatsDatasResponse {
    pub result: ResponseResult,
    pub parameter_list: Option<BatchParameterList>,
    pub statistical_data_list: Option<StatisticalDataList>,
}

envelope!(GetStatsDatasResponse, "GET_STATS_DATAS");

impl FromXml for GetStatsDatasResponse {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result: ResponseResult::from_xml(require_child(node, "RESULT")?)?,
            parameter_list: decode_opt(node, "PARAMETER_LIST")?,
            statistical_data_list: decode_opt(node, "STATISTICAL_DATA_LIST")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchParameterList {
    pub lang: Option<Lang>,
    pub parameters: Vec<BatchParameter>,
}

impl FromXml for BatchParameterList {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            lang: echo_parse(node, "LANG"),
            parameters: decode_all(node, "PARAMETER")?,
        })
    }
}

/// Echo of one request in the batch: its table spec plus the batch switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchParameter {
    pub request_no: String,
    #[serde(flatten)]
    pub spec: StatsDatasSpec,
    #[serde(flatten)]
    pub options: GetStatsDatasParams,
}

impl FromXml for BatchParameter {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            request_no: attr_text(node, "requestNo"),
            spec: StatsDatasSpec::from_xml(node)?,
            options: GetStatsDatasParams::from_xml(node)?,
        })
    }
}

/// Items of one kind tagged with the request they answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestItems<T> {
    pub request_no: String,
    pub items: Vec<T>,
}

fn decode_request_lists<T: FromXml>(
    node: Node<'_, '_>,
    list_tag: &'static str,
    item_tag: &'static str,
) -> Result<Vec<RequestItems<T>>, DecodeError> {
    find_children(node, list_tag)
        .map(|list| {
            Ok(RequestItems {
                request_no: attr_text(list, "requestNo"),
                items: decode_all(list, item_tag)?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticalDataList {
    pub result_inf: Option<ResultInf>,
    pub table_inf_list: Vec<RequestItems<TableInf>>,
    pub class_inf_list: Vec<RequestItems<ClassInf>>,
    pub data_inf_list: Vec<RequestItems<DataInf>>,
}

impl StatisticalDataList {
    /// Everything returned for one request number.
    #[must_use]
    pub fn request(&self, request_no: &str) -> BatchRequest<'_> {
        fn items<'a, T>(lists: &'a [RequestItems<T>], request_no: &str) -> &'a [T] {
            lists
                .iter()
                .find(|list| list.request_no == request_no)
                .map(|list| list.items.as_slice())
                .unwrap_or_default()
        }

        BatchRequest {
            table_infs: items(&self.table_inf_list, request_no),
            class_infs: items(&self.class_inf_list, request_no),
            data_infs: items(&self.data_inf_list, request_no),
        }
    }
}

impl FromXml for StatisticalDataList {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            result_inf: decode_opt(node, "RESULT_INF")?,
            table_inf_list: decode_request_lists(node, "TABLE_INF_LIST", "TABLE_INF")?,
            class_inf_list: decode_request_lists(node, "CLASS_INF_LIST", "CLASS_INF")?,
            data_inf_list: decode_request_lists(node, "DATA_INF_LIST", "DATA_INF")?,
        })
    }
}

/// Borrowed view of the results for one request in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest<'a> {
    pub table_infs: &'a [TableInf],
    pub class_infs: &'a [ClassInf],
    pub data_infs: &'a [DataInf],
}

impl BatchRequest<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table_infs.is_empty() && self.class_infs.is_empty() && self.data_infs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::decode_response;

    #[test]
    fn test_payload_is_optional() {
        let body = "<GET_STATS_DATA><RESULT><STATUS>100</STATUS>\
                    <ERROR_MSG>認証に失敗しました。</ERROR_MSG></RESULT></GET_STATS_DATA>";
        let response: GetStatsDataResponse = decode_response(body.as_bytes()).unwrap();
        assert_eq!(response.result.status, 100);
        assert!(response.parameter.is_none());
        assert!(response.statistical_data.is_none());
    }

    #[test]
    fn test_result_is_required() {
        let body = "<GET_META_INFO><METADATA_INF/></GET_META_INFO>";
        let err = decode_response::<GetMetaInfoResponse>(body.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingElement { element: "RESULT", .. }
        ));
    }

    #[test]
    fn test_stats_name_list_entries() {
        let body = r#"<GET_STATS_LIST>
            <RESULT><STATUS>0</STATUS></RESULT>
            <DATALIST_INF>
                <NUMBER>1</NUMBER>
                <LIST_INF id="000001"><STAT_NAME code="00200521">国勢調査</STAT_NAME>
                <GOV_ORG code="00200">総務省</GOV_ORG></LIST_INF>
            </DATALIST_INF>
        </GET_STATS_LIST>"#;
        let response: GetStatsListResponse = decode_response(body.as_bytes()).unwrap();
        let list = response.datalist_inf.unwrap();
        assert!(list.table_infs.is_empty());
        assert_eq!(list.list_infs[0].stat_name.code, "00200521");
    }

    #[test]
    fn test_batch_request_lookup() {
        let body = r#"<GET_STATS_DATAS>
            <RESULT><STATUS>0</STATUS></RESULT>
            <STATISTICAL_DATA_LIST>
                <TABLE_INF_LIST requestNo="1"><TABLE_INF id="0003090287"/></TABLE_INF_LIST>
                <TABLE_INF_LIST requestNo="2"><TABLE_INF id="0003010900"/></TABLE_INF_LIST>
                <DATA_INF_LIST requestNo="2"><DATA_INF><VALUE>1</VALUE></DATA_INF></DATA_INF_LIST>
            </STATISTICAL_DATA_LIST>
        </GET_STATS_DATAS>"#;
        let response: GetStatsDatasResponse = decode_response(body.as_bytes()).unwrap();
        let list = response.statistical_data_list.unwrap();

        let second = list.request("2");
        assert_eq!(second.table_infs[0].id, "0003010900");
        assert_eq!(second.data_infs[0].values[0].value, "1");
        assert!(list.request("1").data_infs.is_empty());
        assert!(list.request("3").is_empty());
    }
}
