pub mod caller_middleware;
pub mod http;
