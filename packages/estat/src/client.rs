//! The e-Stat service client: one method per remote operation.

use tracing::{debug, instrument};

use crate::context::CallContext;
use crate::error::{EstatError, Result};
use crate::params::{
    CommonParams, GetDataCatalogParams, GetDatasetListParams, GetMetaInfoParams,
    GetStatsDataParams, GetStatsDatasParams, GetStatsListParams, PostDatasetParams,
    RefDatasetParams, StatsDatasSpec,
};
use crate::query::{Query, ToQuery};
use crate::response::{
    decode_response, Envelope, GetDataCatalogResponse, GetDatasetListResponse,
    GetMetaInfoResponse, GetStatsDataResponse, GetStatsDatasResponse, GetStatsListResponse,
    PostDatasetResponse, RefDatasetResponse,
};
use crate::transport::{RawResponse, Transport};

const GET_STATS_LIST: &str = "/getStatsList";
const GET_META_INFO: &str = "/getMetaInfo";
const GET_STATS_DATA: &str = "/getStatsData";
const GET_STATS_DATAS: &str = "/getStatsDatas";
const POST_DATASET: &str = "/postDataset";
const REF_DATASET: &str = "/refDataset";
const GET_DATA_CATALOG: &str = "/getDataCatalog";

/// Typed client over a [`Transport`].
///
/// Every call merges the common parameters into the request, performs one
/// exchange and decodes the XML body. A `RESULT` status other than 0 is
/// returned inside the envelope, not as an error.
pub struct EstatClient<T: Transport> {
    common: CommonParams,
    transport: T,
}

impl<T: Transport> EstatClient<T> {
    pub fn new(common: CommonParams, transport: T) -> Self {
        Self { common, transport }
    }

    #[must_use]
    pub fn common(&self) -> &CommonParams {
        &self.common
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search statistics tables (`getStatsList`).
    #[instrument(skip_all, name = "getStatsList")]
    pub async fn get_stats_list(
        &self,
        ctx: &CallContext,
        params: &GetStatsListParams,
    ) -> Result<GetStatsListResponse> {
        self.get(ctx, "getStatsList", GET_STATS_LIST, params).await
    }

    /// Fetch the classification metadata of a table (`getMetaInfo`).
    #[instrument(skip_all, name = "getMetaInfo", fields(stats_data_id = %params.stats_data_id))]
    pub async fn get_meta_info(
        &self,
        ctx: &CallContext,
        params: &GetMetaInfoParams,
    ) -> Result<GetMetaInfoResponse> {
        self.get(ctx, "getMetaInfo", GET_META_INFO, params).await
    }

    /// Fetch data values of one table (`getStatsData`).
    #[instrument(skip_all, name = "getStatsData")]
    pub async fn get_stats_data(
        &self,
        ctx: &CallContext,
        params: &GetStatsDataParams,
    ) -> Result<GetStatsDataResponse> {
        self.get(ctx, "getStatsData", GET_STATS_DATA, params).await
    }

    /// Fetch several tables in one request (`getStatsDatas`).
    ///
    /// `params` go in the query string; `specs` are sent as a JSON array in
    /// the order given.
    #[instrument(skip_all, name = "getStatsDatas", fields(specs = specs.len()))]
    pub async fn get_stats_datas(
        &self,
        ctx: &CallContext,
        params: &GetStatsDatasParams,
        specs: &[StatsDatasSpec],
    ) -> Result<GetStatsDatasResponse> {
        let query = self.query(params);
        let body = serde_json::to_value(specs)?;
        let raw = ctx
            .run(async {
                self.transport
                    .post_json_with_query(GET_STATS_DATAS, &query, &body)
                    .await
                    .map_err(EstatError::from)
            })
            .await?;
        decode("getStatsDatas", &raw)
    }

    /// Register, update or delete a dataset (`postDataset`).
    ///
    /// The common parameters travel in the URL query; the operation fields
    /// are the form body.
    #[instrument(skip_all, name = "postDataset")]
    pub async fn post_dataset(
        &self,
        ctx: &CallContext,
        params: &PostDatasetParams,
    ) -> Result<PostDatasetResponse> {
        let query = self.common.to_query();
        let form = params.to_query();
        let raw = ctx
            .run(async {
                self.transport
                    .post(POST_DATASET, &query, &form)
                    .await
                    .map_err(EstatError::from)
            })
            .await?;
        decode("postDataset", &raw)
    }

    /// Look up one dataset by id (`refDataset`).
    #[instrument(skip_all, name = "refDataset", fields(data_set_id = %params.data_set_id))]
    pub async fn ref_dataset(
        &self,
        ctx: &CallContext,
        params: &RefDatasetParams,
    ) -> Result<RefDatasetResponse> {
        self.get(ctx, "refDataset", REF_DATASET, params).await
    }

    /// List the caller's datasets (`refDataset` without a dataset id).
    #[instrument(skip_all, name = "getDatasetList")]
    pub async fn get_dataset_list(
        &self,
        ctx: &CallContext,
        params: &GetDatasetListParams,
    ) -> Result<GetDatasetListResponse> {
        self.get(ctx, "getDatasetList", REF_DATASET, params).await
    }

    /// Search downloadable files and database entries (`getDataCatalog`).
    #[instrument(skip_all, name = "getDataCatalog")]
    pub async fn get_data_catalog(
        &self,
        ctx: &CallContext,
        params: &GetDataCatalogParams,
    ) -> Result<GetDataCatalogResponse> {
        self.get(ctx, "getDataCatalog", GET_DATA_CATALOG, params).await
    }

    fn query(&self, params: &impl ToQuery) -> Query {
        self.common.to_query().merged(params.to_query())
    }

    async fn get<R: Envelope>(
        &self,
        ctx: &CallContext,
        operation: &'static str,
        path: &str,
        params: &impl ToQuery,
    ) -> Result<R> {
        let query = self.query(params);
        let raw = ctx
            .run(async {
                self.transport
                    .get(path, &query)
                    .await
                    .map_err(EstatError::from)
            })
            .await?;
        decode(operation, &raw)
    }
}

fn decode<R: Envelope>(operation: &'static str, raw: &RawResponse) -> Result<R> {
    let envelope: R = decode_response(&raw.body)
        .map_err(|source| EstatError::Decode { operation, source })?;
    let result = envelope.result();
    debug!(
        operation,
        http_status = raw.status,
        status = result.status,
        "Decoded response"
    );
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::TransportError;
    use crate::params::{Flag, Lang};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Get(String, Query),
        Post(String, Query, Query),
        Json(String, Query, serde_json::Value),
    }

    struct RecordingTransport {
        body: &'static str,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingTransport {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: Call) -> RawResponse {
            self.calls.lock().unwrap().push(call);
            RawResponse {
                status: 200,
                body: self.body.as_bytes().to_vec(),
            }
        }

        fn last_call(&self) -> Call {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn get(
            &self,
            path: &str,
            query: &Query,
        ) -> std::result::Result<RawResponse, TransportError> {
            Ok(self.record(Call::Get(path.to_string(), query.clone())))
        }

        async fn post(
            &self,
            path: &str,
            query: &Query,
            form: &Query,
        ) -> std::result::Result<RawResponse, TransportError> {
            Ok(self.record(Call::Post(path.to_string(), query.clone(), form.clone())))
        }

        async fn post_json_with_query(
            &self,
            path: &str,
            query: &Query,
            body: &serde_json::Value,
        ) -> std::result::Result<RawResponse, TransportError> {
            Ok(self.record(Call::Json(path.to_string(), query.clone(), body.clone())))
        }
    }

    fn client(body: &'static str) -> EstatClient<RecordingTransport> {
        EstatClient::new(
            CommonParams::new("test-app").with_lang(Lang::Japanese),
            RecordingTransport::new(body),
        )
    }

    #[tokio::test]
    async fn test_get_merges_common_params_first() {
        let client = client("<GET_STATS_LIST><RESULT><STATUS>0</STATUS></RESULT></GET_STATS_LIST>");
        let params = GetStatsListParams {
            limit: Some(2),
            ..Default::default()
        };
        client
            .get_stats_list(&CallContext::new(), &params)
            .await
            .unwrap();

        let Call::Get(path, query) = client.transport().last_call() else {
            panic!("expected a GET");
        };
        assert_eq!(path, "/getStatsList");
        assert_eq!(query.encode(), "appId=test-app&lang=J&limit=2");
    }

    #[tokio::test]
    async fn test_dataset_list_uses_ref_dataset_path() {
        let client =
            client("<GET_DATASET_LIST><RESULT><STATUS>0</STATUS></RESULT></GET_DATASET_LIST>");
        client
            .get_dataset_list(&CallContext::new(), &GetDatasetListParams::default())
            .await
            .unwrap();

        let Call::Get(path, _) = client.transport().last_call() else {
            panic!("expected a GET");
        };
        assert_eq!(path, "/refDataset");
    }

    #[tokio::test]
    async fn test_post_dataset_splits_query_and_form() {
        let client = client("<POST_DATASET><RESULT><STATUS>0</STATUS></RESULT></POST_DATASET>");
        let params = PostDatasetParams {
            stats_data_id: Some("0003010900".to_string()),
            ..Default::default()
        };
        client
            .post_dataset(&CallContext::new(), &params)
            .await
            .unwrap();

        let Call::Post(path, query, form) = client.transport().last_call() else {
            panic!("expected a POST");
        };
        assert_eq!(path, "/postDataset");
        assert_eq!(query.encode(), "appId=test-app&lang=J");
        assert_eq!(form.encode(), "statsDataId=0003010900");
    }

    #[tokio::test]
    async fn test_stats_datas_sends_specs_in_order() {
        let client =
            client("<GET_STATS_DATAS><RESULT><STATUS>0</STATUS></RESULT></GET_STATS_DATAS>");
        let params = GetStatsDatasParams {
            meta_get_flg: Some(Flag::Yes),
            ..Default::default()
        };
        let specs = [
            StatsDatasSpec::new("0003090287").with_window(1, 10),
            StatsDatasSpec::new("0003010900").with_window(1, 10),
        ];
        client
            .get_stats_datas(&CallContext::new(), &params, &specs)
            .await
            .unwrap();

        let Call::Json(path, query, body) = client.transport().last_call() else {
            panic!("expected a JSON POST");
        };
        assert_eq!(path, "/getStatsDatas");
        assert_eq!(query.encode(), "appId=test-app&lang=J&metaGetFlg=Y");
        assert_eq!(body[0]["statsDataId"], "0003090287");
        assert_eq!(body[1]["statsDataId"], "0003010900");
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_wrong_root_is_decode_error() {
        let client = client("<GET_META_INFO><RESULT><STATUS>0</STATUS></RESULT></GET_META_INFO>");
        let err = client
            .get_stats_list(&CallContext::new(), &GetStatsListParams::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EstatError::Decode {
                operation: "getStatsList",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_context_skips_transport() {
        let client = client("<GET_STATS_LIST><RESULT><STATUS>0</STATUS></RESULT></GET_STATS_LIST>");
        let ctx = CallContext::new();
        ctx.cancel();
        let err = client
            .get_stats_list(&ctx, &GetStatsListParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EstatError::Cancelled));
        assert!(client.transport().calls.lock().unwrap().is_empty());
    }
}
