use jsonwebtoken::{decode, Algorithm, DecodingKey, Header, Validation};

use super::{claims::SupabaseClaims, jwks::KeyProvider};

/// Audience the auth service stamps on signed-in user tokens
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

pub async fn validate_jwt(
    token: &str,
    keys: &dyn KeyProvider,
    shared_secret: Option<&str>,
    expected_issuer: &str,
) -> Result<SupabaseClaims, String> {
    let header = decode_header(token)?;

    let decoding_key = match header.alg {
        Algorithm::HS256 => {
            let secret = shared_secret.ok_or("HS256 token received but no shared secret is configured")?;
            DecodingKey::from_secret(secret.as_bytes())
        }
        Algorithm::RS256 | Algorithm::ES256 => {
            let kid = header.kid.as_deref().ok_or("Missing kid in JWT header")?;
            keys.decoding_key(kid).await?
        }
        other => return Err(format!("Unsupported signing algorithm: {:?}", other)),
    };

    let mut validation = Validation::new(header.alg);
    validation.set_issuer(&[expected_issuer]);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
    validation.validate_exp = true;

    let token_data = decode::<SupabaseClaims>(token, &decoding_key, &validation)
        .map_err(|e| format!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

fn decode_header(token: &str) -> Result<Header, String> {
    jsonwebtoken::decode_header(token).map_err(|e| format!("Failed to decode JWT header: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jsonwebtoken::{encode, EncodingKey};

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";
    const ISSUER: &str = "https://project.supabase.co/auth/v1";

    struct NoKeys;

    #[async_trait]
    impl KeyProvider for NoKeys {
        async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, String> {
            Err(format!("No key found with kid: {}", kid))
        }
    }

    fn claims(iss: &str, aud: &str, exp_offset: i64) -> SupabaseClaims {
        let now = chrono::Utc::now().timestamp();
        SupabaseClaims {
            sub: "4f1c9a52-2f1d-4a55-9d7e-0f6f4a8c2b11".to_string(),
            exp: now + exp_offset,
            iat: now,
            iss: iss.to_string(),
            aud: aud.to_string(),
            email: Some("parent@example.com".to_string()),
            role: Some("authenticated".to_string()),
        }
    }

    fn sign(claims: &SupabaseClaims, alg: Algorithm, secret: &str) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[tokio::test]
    async fn test_valid_hs256_token() {
        let token = sign(&claims(ISSUER, "authenticated", 3600), Algorithm::HS256, SECRET);
        let claims = validate_jwt(&token, &NoKeys, Some(SECRET), ISSUER).await.unwrap();

        assert_eq!(claims.sub, "4f1c9a52-2f1d-4a55-9d7e-0f6f4a8c2b11");
        assert_eq!(claims.email.as_deref(), Some("parent@example.com"));
    }

    #[tokio::test]
    async fn test_rejects_bad_tokens() {
        let expired = sign(&claims(ISSUER, "authenticated", -3600), Algorithm::HS256, SECRET);
        assert!(validate_jwt(&expired, &NoKeys, Some(SECRET), ISSUER).await.is_err());

        let wrong_issuer = sign(&claims("https://other.supabase.co/auth/v1", "authenticated", 3600), Algorithm::HS256, SECRET);
        assert!(validate_jwt(&wrong_issuer, &NoKeys, Some(SECRET), ISSUER).await.is_err());

        let anon = sign(&claims(ISSUER, "anon", 3600), Algorithm::HS256, SECRET);
        assert!(validate_jwt(&anon, &NoKeys, Some(SECRET), ISSUER).await.is_err());

        let forged = sign(&claims(ISSUER, "authenticated", 3600), Algorithm::HS256, "a-different-secret-of-similar-length!!");
        assert!(validate_jwt(&forged, &NoKeys, Some(SECRET), ISSUER).await.is_err());
    }

    #[tokio::test]
    async fn test_hs256_requires_configured_secret() {
        let token = sign(&claims(ISSUER, "authenticated", 3600), Algorithm::HS256, SECRET);
        let err = validate_jwt(&token, &NoKeys, None, ISSUER).await.unwrap_err();
        assert!(err.contains("no shared secret"));
    }

    #[tokio::test]
    async fn test_unsupported_algorithm() {
        let token = sign(&claims(ISSUER, "authenticated", 3600), Algorithm::HS512, SECRET);
        let err = validate_jwt(&token, &NoKeys, Some(SECRET), ISSUER).await.unwrap_err();
        assert!(err.contains("Unsupported"));
    }

    #[tokio::test]
    async fn test_asymmetric_token_needs_known_kid() {
        // {"alg":"RS256","typ":"JWT"}
        let no_kid = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.e30.c2ln";
        let err = validate_jwt(no_kid, &NoKeys, None, ISSUER).await.unwrap_err();
        assert!(err.contains("Missing kid"));

        // {"alg":"RS256","typ":"JWT","kid":"key-1"}
        let unknown_kid = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCIsImtpZCI6ImtleS0xIn0.e30.c2ln";
        let err = validate_jwt(unknown_kid, &NoKeys, None, ISSUER).await.unwrap_err();
        assert!(err.contains("key-1"));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        assert!(validate_jwt("not-a-jwt", &NoKeys, Some(SECRET), ISSUER).await.is_err());
    }
}
