pub mod api_error;
pub mod rate_limit;
pub mod response;
