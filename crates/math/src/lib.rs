#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/riskdecomp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod covariance;
pub use covariance::{column_means, sample_covariance};

mod linalg;
pub use linalg::{is_symmetric, quadratic_form, weighted_row};

mod moments;
pub use moments::{SlidingMoments, mean, moments, sample_std, sample_variance, skewness};

mod error;
pub use error::MathError;
