use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use chrono::Utc;
use tracing::debug;

use shared_models::auth::{JwtClaims, User};

type HmacSha256 = Hmac<Sha256>;

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<User, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        return Err("Invalid token signature".to_string());
    }

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| "Invalid claims encoding".to_string())?;
    let claims: JwtClaims = serde_json::from_slice(&claims_bytes)
        .map_err(|_| "Invalid claims payload".to_string())?;

    if let Some(exp) = claims.exp {
        if (Utc::now().timestamp() as u64) >= exp {
            return Err("Token has expired".to_string());
        }
    }

    Ok(User {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

/// Sign a token with the given claims. Used by tests and local tooling; the
/// production issuer lives outside this service.
pub fn sign_token(claims: &JwtClaims, jwt_secret: &str) -> Result<String, String> {
    let header = serde_json::json!({"alg": "HS256", "typ": "JWT"});
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
    let claims_b64 = URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(claims).map_err(|e| e.to_string())?,
    );

    let signing_input = format!("{}.{}", header_b64, claims_b64);
    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature_b64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_claims() -> JwtClaims {
        JwtClaims {
            sub: "admin-1".to_string(),
            exp: Some((Utc::now().timestamp() as u64) + 3600),
            email: Some("admin@sabinadecor.com.br".to_string()),
            role: Some("admin".to_string()),
            iat: None,
        }
    }

    #[test]
    fn round_trips_valid_token() {
        let token = sign_token(&admin_claims(), "secret").unwrap();
        let user = validate_token(&token, "secret").unwrap();
        assert_eq!(user.id, "admin-1");
        assert!(user.is_admin());
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign_token(&admin_claims(), "secret").unwrap();
        assert!(validate_token(&token, "other").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = admin_claims();
        claims.exp = Some(1);
        let token = sign_token(&claims, "secret").unwrap();
        assert!(validate_token(&token, "secret").is_err());
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(validate_token("not-a-token", "secret").is_err());
    }
}
