#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/riskdecomp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod statistic;
pub use statistic::WindowStatistic;

mod estimator;
pub use estimator::{CovarianceEstimator, EstimatorError};
