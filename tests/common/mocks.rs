//! Mock implementations and fixtures shared by integration tests.
//!
//! Re-exports the doubles from `superego::adapters::mock`.

pub use superego::adapters::mock::{
    FixedSessionId, InMemoryStorage, MockEncryptor, MockHttpClient, MockProvidersSource,
    MockResponse, MockThreadFetcher,
};

/// Session id every test context sends on key submission.
pub const TEST_SESSION_ID: &str = "test-session-0001";

/// A `/models` body with one provider missing from the parameter schema.
pub fn providers_body() -> serde_json::Value {
    serde_json::json!({
        "anthropic": ["claude-3-5-sonnet", "claude-3-haiku"],
        "openai": ["gpt-4o", "gpt-4o-mini"],
        "openai_compatible": [],
        "mistral": ["mistral-large"]
    })
}

/// A `/threads/{id}/state` body.
pub fn thread_state_body(status: &str, marker: &str) -> serde_json::Value {
    serde_json::json!({
        "status": status,
        "values": { "marker": marker }
    })
}
