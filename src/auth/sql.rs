use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::create_connection;
use crate::models::{User, UserNoId, Verification, VerificationNoId};
use crate::schema::{users, verifications};

pub fn insert_user(username: &str, email: &str, password_hash: &str) -> Option<User> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match diesel::insert_into(users::table)
        .values(&UserNoId {
            username: username.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
        })
        .get_result::<User>(&connection)
    {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Failed to insert user {} (error {})", email, e);
            None
        }
    }
}

pub fn get_user_by_email(email: &str) -> Option<User> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match users::table
        .filter(users::email.eq(email))
        .get_result::<User>(&connection)
    {
        Ok(user) => Some(user),
        Err(e) => {
            if e != diesel::NotFound {
                warn!("Failed to get user {} with error {}", email, e);
            }
            None
        }
    }
}

pub fn get_user_by_email_or_username(email: &str, username: &str) -> Option<User> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match users::table
        .filter(users::email.eq(email).or(users::username.eq(username)))
        .first::<User>(&connection)
    {
        Ok(user) => Some(user),
        Err(e) => {
            if e != diesel::NotFound {
                warn!("Failed to look up user {} with error {}", email, e);
            }
            None
        }
    }
}

pub fn mark_user_verified(user_id: i32) -> bool {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return false;
        }
    };
    match diesel::update(users::table.filter(users::id.eq(user_id)))
        .set(users::is_verified.eq(true))
        .execute(&connection)
    {
        Ok(_) => true,
        Err(e) => {
            warn!("Failed to mark user {} verified (error {})", user_id, e);
            false
        }
    }
}

pub fn insert_verification(
    user_id: i32,
    code: &str,
    expires_at: NaiveDateTime,
) -> Option<Verification> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match diesel::insert_into(verifications::table)
        .values(&VerificationNoId {
            user_id,
            code: code.to_string(),
            expires_at,
        })
        .get_result::<Verification>(&connection)
    {
        Ok(verification) => Some(verification),
        Err(e) => {
            warn!(
                "Failed to insert verification for user {} (error {})",
                user_id, e
            );
            None
        }
    }
}

/// Newest unexpired code matching the email and code, if any.
pub fn find_valid_verification(email: &str, code: &str) -> Option<Verification> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match verifications::table
        .inner_join(users::table)
        .filter(users::email.eq(email))
        .filter(verifications::code.eq(code))
        .filter(verifications::expires_at.gt(diesel::dsl::now))
        .order(verifications::created_at.desc())
        .select(verifications::all_columns)
        .first::<Verification>(&connection)
    {
        Ok(verification) => Some(verification),
        Err(e) => {
            if e != diesel::NotFound {
                warn!("Failed to look up verification for {} (error {})", email, e);
            }
            None
        }
    }
}

pub fn delete_verification(id: i32) -> bool {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return false;
        }
    };
    match diesel::delete(verifications::table.filter(verifications::id.eq(id))).execute(&connection)
    {
        Ok(_) => true,
        Err(e) => {
            warn!("Failed to delete verification {} (error {})", id, e);
            false
        }
    }
}
