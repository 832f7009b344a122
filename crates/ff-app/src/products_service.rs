//! Product search over the chat endpoints.
//!
//! The response shape varies per call path; whatever comes back goes through
//! the product normalizer, so callers always see `Vec<ProductCard>` — an
//! unrecognized payload is an empty list, not an error.

use ff_api::ApiClient;
use ff_model::ProductCard;
use ff_normalize::normalize_products;
use tracing::debug;

use crate::error::AppResult;

pub async fn search(client: &ApiClient, query: &str) -> AppResult<Vec<ProductCard>> {
    let value = client.chat_products(query).await?;
    let cards = normalize_products(&value);
    debug!(count = cards.len(), "normalized product search response");
    Ok(cards)
}

/// Voice path: upload the recorded clip, normalize the same way.
pub async fn voice_search(
    client: &ApiClient,
    file_name: &str,
    audio: Vec<u8>,
) -> AppResult<Vec<ProductCard>> {
    let value = client.voice_chat_products(file_name, audio).await?;
    Ok(normalize_products(&value))
}

/// Transcription only, for populating the query box before a text search.
pub async fn transcribe(
    client: &ApiClient,
    file_name: &str,
    audio: Vec<u8>,
) -> AppResult<String> {
    let value = client.voice_to_text(file_name, audio).await?;
    Ok(value
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string())
}
