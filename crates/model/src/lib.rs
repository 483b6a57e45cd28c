#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/riskdecomp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod covariance;
pub use covariance::{SampleCovarianceConfig, SampleCovarianceEstimator};

mod volatility;
pub use volatility::{portfolio_variance, portfolio_volatility};

mod decompose;
pub use decompose::{ContributionDecomposer, DecomposerConfig};

mod pipeline;
pub use pipeline::RiskPipeline;

mod rolling;
pub use rolling::{RollingConfig, RollingMode, RollingWindowEngine};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use riskdecomp_traits::{CovarianceEstimator, WindowStatistic};

    pub use super::{
        ContributionDecomposer, ModelError, RiskPipeline, RollingWindowEngine,
        SampleCovarianceEstimator, portfolio_volatility,
    };
}
