use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reasoning: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub recent_queries: Vec<String>,
}
