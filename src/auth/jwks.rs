use async_trait::async_trait;
use jsonwebtoken::{jwk::JwkSet, DecodingKey};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Source of verification keys for asymmetrically signed tokens
#[async_trait]
pub trait KeyProvider: Send + Sync {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, String>;
}

/// Minimum gap between refetches triggered by an unknown kid
const REFETCH_INTERVAL: Duration = Duration::from_secs(60);

pub struct JwksCache {
    cache: Cache<String, Arc<JwkSet>>,
    refetch_guard: Cache<(), ()>,
    jwks_url: String,
    client: reqwest::Client,
}

impl JwksCache {
    pub fn new(jwks_url: impl Into<String>) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(3600)) // 1 hour TTL
            .build();

        let refetch_guard = Cache::builder().time_to_live(REFETCH_INTERVAL).build();

        Self {
            cache,
            refetch_guard,
            jwks_url: jwks_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get_jwks(&self) -> Result<Arc<JwkSet>, String> {
        if let Some(jwks) = self.cache.get(&self.jwks_url).await {
            return Ok(jwks);
        }

        tracing::debug!(url = %self.jwks_url, "Fetching signing keys");

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("JWKS endpoint returned {}", response.status()));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse JWKS: {}", e))?;

        let jwks_arc = Arc::new(jwks);
        self.cache.insert(self.jwks_url.clone(), jwks_arc.clone()).await;

        Ok(jwks_arc)
    }

    /// Drops the cached key set so the next lookup refetches it
    pub async fn invalidate(&self) {
        self.cache.invalidate(&self.jwks_url).await;
    }

    /// True for the first caller in each refetch interval
    async fn claim_refetch(&self) -> bool {
        self.refetch_guard.entry(()).or_insert(()).await.is_fresh()
    }
}

fn find_key(jwks: &JwkSet, kid: &str) -> Option<Result<DecodingKey, String>> {
    jwks.find(kid).map(|jwk| {
        DecodingKey::from_jwk(jwk).map_err(|e| format!("Failed to create decoding key: {}", e))
    })
}

#[async_trait]
impl KeyProvider for JwksCache {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, String> {
        let jwks = self.get_jwks().await?;
        if let Some(key) = find_key(&jwks, kid) {
            return key;
        }

        let not_found = || Err(format!("No key found with kid: {}", kid));

        // Keys rotate; an unknown kid may belong to a set newer than the cached one
        if !self.claim_refetch().await {
            tracing::debug!(kid = %kid, "Unknown kid, refetch throttled");
            return not_found();
        }
        self.invalidate().await;
        let jwks = self.get_jwks().await?;
        find_key(&jwks, kid).unwrap_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_set() -> JwkSet {
        serde_json::from_value(serde_json::json!({
            "keys": [{
                "kty": "oct",
                "kid": "shared-1",
                "alg": "HS256",
                "k": "c2VjcmV0LWtleS1mb3ItdGVzdHM"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_key_by_kid() {
        let jwks = key_set();
        assert!(matches!(find_key(&jwks, "shared-1"), Some(Ok(_))));
        assert!(find_key(&jwks, "rotated-away").is_none());
    }

    #[tokio::test]
    async fn test_refetch_is_claimed_once_per_interval() {
        let cache = JwksCache::new("http://127.0.0.1:9/jwks");
        assert!(cache.claim_refetch().await);
        assert!(!cache.claim_refetch().await);
    }

    #[tokio::test]
    async fn test_unknown_kid_does_not_refetch_while_throttled() {
        // Nothing listens on the discard port; a real fetch would fail differently
        let cache = JwksCache::new("http://127.0.0.1:9/jwks");
        cache
            .cache
            .insert(cache.jwks_url.clone(), Arc::new(key_set()))
            .await;
        assert!(cache.claim_refetch().await);

        assert!(cache.decoding_key("shared-1").await.is_ok());
        let err = cache.decoding_key("forged").await.err().unwrap();
        assert_eq!(err, "No key found with kid: forged");
    }
}
