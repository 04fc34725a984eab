pub mod normalize;
pub mod orchestrator;
pub mod request;
pub mod source;
pub mod stats;

pub use normalize::{normalize, ColumnDef, TableProjection, TableRow};
pub use orchestrator::{
    QueryFailure, QueryOrchestrator, QueryState, QueryTicket, StatisticsTicket,
};
pub use request::{build_feature_info_request, FeatureInfoRequest};
pub use source::{FeatureInfoSource, HttpStatisticsSource, StatisticsSource, WmsFeatureInfoSource};
pub use stats::{derive_statistics_request, StatisticsRequest, StatisticsResult};
