//! Client-side transforms that turn an [`AnalysisResult`] into
//! display-ready data: proportional rings, grouped micronutrients and the
//! draggable result sheet state.
//!
//! [`AnalysisResult`]: crate::domain::food_analysis::AnalysisResult

pub mod grouping;
pub mod rings;
pub mod sheet;
pub mod view;

pub use grouping::*;
pub use rings::*;
pub use sheet::*;
pub use view::*;
