#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/riskdecomp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod frame;
pub use frame::{
    contribution_frame, date_column, returns_table_from_long, returns_table_from_wide,
    returns_table_to_wide, rolling_frame,
};

mod error;
pub use error::UtilsError;
