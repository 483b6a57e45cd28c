#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/riskdecomp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asset;
pub use asset::AssetId;

mod covariance;
pub use covariance::CovarianceMatrix;

mod moments;
pub use moments::Moments;

mod report;
pub use report::{AssetContribution, ContributionReport, RollingPoint, RollingStatResult};

mod returns;
pub use returns::{AssetReturnSeries, ReturnsTable};

mod weights;
pub use weights::PortfolioWeights;

mod error;
pub use error::DataError;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
