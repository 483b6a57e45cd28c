#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/riskdecomp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod dispersion;
pub use dispersion::{StdDev, Variance};

mod location;
pub use location::{Mean, Skewness};

use riskdecomp_traits::WindowStatistic;

/// Look up a built-in statistic by its name.
///
/// Accepts the canonical names plus the short aliases `std`, `var` and
/// `skew`.
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn WindowStatistic>> {
    match name {
        "std_dev" | "std" => Some(Box::new(StdDev::new())),
        "variance" | "var" => Some(Box::new(Variance)),
        "mean" => Some(Box::new(Mean)),
        "skewness" | "skew" => Some(Box::new(Skewness)),
        _ => None,
    }
}
