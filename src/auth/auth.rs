use chrono::{Duration, Utc};
use rocket::response::content::RawJson;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::json;

use super::ratelimit::RateLimitStore;
use super::{sql, util};
use crate::config;
use crate::email;
use crate::error::ApiError;

const PASSWORD_POLICY: &str =
    "Password must be at least 8 characters long and contain at least one uppercase letter and one number";

type ApiResult = Result<Custom<RawJson<String>>, ApiError>;

fn required<'a>(field: &'a Option<String>, message: &'static str) -> Result<&'a str, ApiError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::Validation(message)),
    }
}

fn new_code_expiry() -> chrono::NaiveDateTime {
    (Utc::now() + Duration::seconds(config::verification_code_expiry())).naive_utc()
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

#[post("/register", data = "<body>")]
pub async fn register(body: Json<RegisterRequest>) -> ApiResult {
    let body = body.into_inner();
    let email = required(&body.email, "All fields are required")?;
    let password = required(&body.password, "All fields are required")?;
    let username = required(&body.username, "All fields are required")?;

    if !util::validate_password(password) {
        return Err(ApiError::Validation(PASSWORD_POLICY));
    }

    if sql::get_user_by_email_or_username(email, username).is_some() {
        return Err(ApiError::Conflict);
    }

    let password_hash = util::hash_password(password).ok_or(ApiError::Internal)?;
    let user = sql::insert_user(username, email, &password_hash).ok_or(ApiError::Internal)?;

    let code = util::generate_verification_code();
    sql::insert_verification(user.id, &code, new_code_expiry()).ok_or(ApiError::Internal)?;

    if let Err(e) = email::send_verification_email(email, &code).await {
        error!("Failed to send verification email to {} (error {})", email, e);
        return Err(ApiError::Internal);
    }

    info!("Registered user {} ({})", user.username, user.email);
    Ok(make_json_response!(
        201,
        "Registration successful. Please check your email for verification code."
    ))
}

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub email: Option<String>,
    pub code: Option<String>,
}

#[post("/verify-email", data = "<body>")]
pub async fn verify_email(body: Json<VerifyEmailRequest>) -> ApiResult {
    let body = body.into_inner();
    let email = required(&body.email, "Email and verification code are required")?;
    let code = required(&body.code, "Email and verification code are required")?;

    let verification = sql::find_valid_verification(email, code).ok_or(ApiError::InvalidCode)?;

    if !sql::mark_user_verified(verification.user_id) {
        return Err(ApiError::Internal);
    }
    if !sql::delete_verification(verification.id) {
        return Err(ApiError::Internal);
    }

    info!("Verified email {}", email);
    Ok(make_json_response!(200, "Email verified successfully"))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[post("/login", data = "<body>")]
pub async fn login(body: Json<LoginRequest>) -> ApiResult {
    let body = body.into_inner();
    let email = required(&body.email, "Email and password are required")?;
    let password = required(&body.password, "Email and password are required")?;

    let user = sql::get_user_by_email(email).ok_or(ApiError::InvalidCredentials)?;

    if !user.is_verified {
        return Err(ApiError::NotVerified);
    }

    if !util::verify_password(password, &user.password) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = util::issue_token(&user).ok_or(ApiError::Internal)?;
    Ok(make_json_response!(200, "OK", json!({ "token": token })))
}

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Option<String>,
}

#[post("/resend-verification", data = "<body>")]
pub async fn resend_verification(
    body: Json<ResendVerificationRequest>,
    limiter: &State<Box<dyn RateLimitStore>>,
) -> ApiResult {
    let body = body.into_inner();
    let email = required(&body.email, "Email is required")?;

    if !limiter.hit(email) {
        info!("Rate limited resend for {}", email);
        return Err(ApiError::RateLimited);
    }

    let user = sql::get_user_by_email(email).ok_or(ApiError::NotFound("User not found"))?;

    if user.is_verified {
        return Err(ApiError::Validation("Email is already verified"));
    }

    let code = util::generate_verification_code();
    sql::insert_verification(user.id, &code, new_code_expiry()).ok_or(ApiError::Internal)?;

    if let Err(e) = email::send_verification_email(email, &code).await {
        error!("Failed to send verification email to {} (error {})", email, e);
        return Err(ApiError::Internal);
    }

    Ok(make_json_response!(
        200,
        "New verification code sent successfully"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank_fields() {
        assert!(required(&None, "All fields are required").is_err());
        assert!(required(&Some(String::from("  ")), "All fields are required").is_err());
        assert_eq!(
            required(&Some(String::from(" a@b.com ")), "All fields are required").unwrap(),
            "a@b.com"
        );
    }
}
