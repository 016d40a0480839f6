use reqwest::{blocking::Client, StatusCode};
use serde_json::Value;

use super::{ReachableTree, ReachableTreeError, ReachableTreeQuery, ReachableTreeSource};

/// blocking HTTP client for a reachable tree endpoint that answers
/// `GET <url>?lon=..&lat=..&uphill=..` with a JSON document of GeoJSON layers.
pub struct AccessMapClient {
    url: String,
    client: Client,
}

impl AccessMapClient {
    pub fn new(url: &str) -> Result<AccessMapClient, ReachableTreeError> {
        let client = Client::builder().build()?;
        Ok(AccessMapClient {
            url: url.to_string(),
            client,
        })
    }
}

impl ReachableTreeSource for AccessMapClient {
    fn reachable_tree(
        &self,
        query: &ReachableTreeQuery,
    ) -> Result<ReachableTree, ReachableTreeError> {
        let response = self
            .client
            .get(&self.url)
            .query(&query.query_params())
            .send()?;
        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let message = response.text()?;
            return Err(ReachableTreeError::ValidationError(message));
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ReachableTreeError::StatusError(status.as_u16(), message));
        }
        let text = response.text()?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ReachableTreeError::InvalidResponse(format!("response is not JSON: {e}"))
        })?;
        ReachableTree::try_from_response(body)
    }
}
