pub mod capture;
pub mod common;
pub mod food_analysis;
pub mod nutrition_view;
pub mod quota;
pub mod storage;
