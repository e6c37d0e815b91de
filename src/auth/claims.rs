use serde::{Deserialize, Serialize};

/// Access token claims issued by the Supabase auth service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseClaims {
    pub sub: String, // auth user id (uuid)
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub email: Option<String>,
    pub role: Option<String>,
}
