//! Typed response envelopes and the records they contain.
//!
//! Every envelope has a required `RESULT`, the echoed `PARAMETER` and an
//! optional payload. The payload is missing when the service reports an
//! error status, so it is modelled as `Option` rather than failing the
//! decode.

/// Implements [`Envelope`] for a struct with a `result` field.
macro_rules! envelope {
    ($ty:ty, $root:literal) => {
        impl $crate::response::Envelope for $ty {
            const ROOT: &'static str = $root;

            fn result(&self) -> &$crate::response::ResponseResult {
                &self.result
            }
        }
    };
}

pub mod catalog;
pub mod class;
pub mod common;
pub mod data;
pub mod dataset;
pub mod stats;
pub mod table;

pub use catalog::{DataCatalogInf, DataCatalogListInf, Dataset, GetDataCatalogResponse, Resource};
pub use class::{Class, ClassInf, ClassObj, Explanation};
pub use common::{CodedName, ResponseResult, ResultInf};
pub use data::{Annotation, DataInf, Note, Value};
pub use dataset::{
    DatasetInf, DatasetListInf, GetDatasetListResponse, PostDatasetResponse, RefDatasetResponse,
    RegistInf,
};
pub use stats::{
    BatchParameter, BatchParameterList, BatchRequest, DatalistInf, GetMetaInfoResponse,
    GetStatsDataResponse, GetStatsDatasResponse, GetStatsListResponse, MetadataInf,
    RequestItems, StatisticalData, StatisticalDataList,
};
pub use table::{Description, StatisticsNameSpec, StatsNameInf, TableInf, Title, TitleSpec};

use crate::error::DecodeError;
use crate::xml::{expect_root, parse_document, FromXml};

/// A top-level response document.
pub trait Envelope: FromXml {
    /// Expected root element, e.g. `GET_STATS_LIST`.
    const ROOT: &'static str;

    /// The service's own status for the call.
    fn result(&self) -> &ResponseResult;
}

/// Decode a response body into envelope `T`, checking the root element.
pub fn decode_response<T: Envelope>(body: &[u8]) -> Result<T, DecodeError> {
    let doc = parse_document(body)?;
    let root = expect_root(&doc, T::ROOT)?;
    T::from_xml(root)
}
