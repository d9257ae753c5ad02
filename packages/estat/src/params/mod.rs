//! Request parameter records, one per operation, plus the shared pieces.
//!
//! Every record implements [`ToQuery`](crate::query::ToQuery) for the
//! camelCase wire names the service expects and
//! [`FromXml`](crate::xml::FromXml) for the upper-case echo the service
//! returns in each response's `PARAMETER` element.

pub mod catalog;
pub mod common;
pub mod dataset;
pub mod narrowing;
pub mod stats;

pub use catalog::GetDataCatalogParams;
pub use common::{CommonParams, EchoedParameters, Flag, Lang, ProcessMode};
pub use dataset::{GetDatasetListParams, PostDatasetParams, RefDatasetParams};
pub use narrowing::{Condition, NarrowingCondition, WireKey};
pub use stats::{
    GetMetaInfoParams, GetStatsDataParams, GetStatsDatasParams, GetStatsListParams,
    StatsDatasSpec,
};
