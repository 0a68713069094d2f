pub mod api_client;
pub mod llm;
pub mod quota;
pub mod storage;
