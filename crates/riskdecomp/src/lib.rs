//! # riskdecomp
//!
//! Portfolio volatility contribution decomposition and rolling window
//! statistics.
//!
//! This crate provides a unified interface to the riskdecomp workspace.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Value types (returns tables, weights, covariance, reports)
//! - `traits`: Estimator and window statistic traits
//! - `math`: Covariance, quadratic form and moment kernels
//! - `stats`: Window statistic implementations
//! - `model`: Covariance estimation, decomposition and rolling engine
//! - `utils`: Polars frame adapters
//! - `cli`: The `analyze` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use riskdecomp::{
//!     model::RiskPipeline,
//!     primitives::{PortfolioWeights, ReturnsTable},
//! };
//!
//! let report = RiskPipeline::new().run(&table, &weights)?;
//! for c in report.iter() {
//!     println!("{}: {:.2}%", c.asset, 100.0 * c.percentage);
//! }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use riskdecomp_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use riskdecomp_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use riskdecomp_math as math;
#[cfg(feature = "stats")]
#[doc(inline)]
pub use riskdecomp_stats as stats;
#[cfg(feature = "model")]
#[doc(inline)]
pub use riskdecomp_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use riskdecomp_utils as utils;
