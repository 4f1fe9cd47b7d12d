use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::User;

/// At least 8 characters, one uppercase letter and one digit.
pub fn validate_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn generate_verification_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

pub fn hash_password(password: &str) -> Option<String> {
    match bcrypt::hash(password, bcrypt::DEFAULT_COST) {
        Ok(hash) => Some(hash),
        Err(e) => {
            warn!("Failed to hash password (error {})", e);
            None
        }
    }
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub exp: i64,
}

pub fn issue_token(user: &User) -> Option<String> {
    issue_token_with_secret(user, &config::jwt_secret())
}

fn issue_token_with_secret(user: &User, secret: &str) -> Option<String> {
    let claims = Claims {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        exp: (Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    ) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!("Failed to sign token for user {} (error {})", user.id, e);
            None
        }
    }
}

pub fn decode_token(token: &str) -> Option<Claims> {
    decode_token_with_secret(token, &config::jwt_secret())
}

fn decode_token_with_secret(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .ok()
}

/// Identity extracted from the `Authorization: Bearer <token>` header. The
/// token must be a JWT signed with the login secret.
#[derive(Debug)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub username: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = match request.headers().get_one("Authorization") {
            Some(header) => header,
            None => {
                info!("Missing Authorization header");
                return Outcome::Error((Status::Unauthorized, ()));
            }
        };

        let token = header.trim_start_matches("Bearer ").trim();
        match decode_token(token) {
            Some(claims) => Outcome::Success(AuthUser {
                id: claims.id,
                email: claims.email,
                username: claims.username,
            }),
            None => {
                info!("Rejected request with invalid bearer token");
                Outcome::Error((Status::Unauthorized, ()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: 7,
            username: String::from("ada"),
            email: String::from("ada@example.com"),
            password: String::from("irrelevant"),
            is_verified: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn password_policy_rejects_weak_passwords() {
        assert!(!validate_password("short1"));
        assert!(!validate_password("alllowercase1"));
        assert!(!validate_password("NoDigitsHere"));
    }

    #[test]
    fn password_policy_accepts_compliant_password() {
        assert!(validate_password("Sufficient1"));
    }

    #[test]
    fn verification_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_verification_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn hashed_passwords_verify() {
        let hash = bcrypt::hash("Sufficient1", 4).unwrap();
        assert!(verify_password("Sufficient1", &hash));
        assert!(!verify_password("Different1", &hash));
    }

    #[test]
    fn tokens_round_trip_and_carry_identity() {
        let user = test_user();
        let token = issue_token_with_secret(&user, "secret").unwrap();
        let claims = decode_token_with_secret(&token, "secret").unwrap();
        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.username, user.username);

        let lifetime = claims.exp - Utc::now().timestamp();
        assert!(lifetime > 23 * 3600 && lifetime <= 24 * 3600);
    }

    #[test]
    fn tokens_signed_with_other_secret_are_rejected() {
        let token = issue_token_with_secret(&test_user(), "secret").unwrap();
        assert!(decode_token_with_secret(&token, "other").is_none());
    }
}
