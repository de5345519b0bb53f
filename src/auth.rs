use actix_web::{http::header, HttpRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use log::{error, info};
use once_cell::sync::OnceCell;
use sqlx::SqlitePool;

use crate::error::{ApiError, ApiResult};
use crate::models::task::Task;
use crate::models::user::User;

/// Username/secret pair taken from an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Returns `None` when the header is absent, is not Basic, does not decode,
/// or carries an empty username or secret.
pub fn basic_credentials(req: &HttpRequest) -> Option<Credentials> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    parse_basic(value)
}

fn parse_basic(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// bcrypt only looks at the first 72 bytes of a secret.
pub const MAX_PASSWORD_BYTES: usize = 72;

const DUMMY_SECRET: &str = "task-tracker-dummy-secret";

static DUMMY_HASH: OnceCell<String> = OnceCell::new();

/// Hashes the stand-in secret that unknown usernames are checked against, at
/// the same cost as real accounts. Call once at startup.
pub fn prepare_dummy_hash(cost: u32) -> Result<(), BcryptError> {
    DUMMY_HASH.get_or_try_init(|| hash(DUMMY_SECRET, cost)).map(|_| ())
}

pub fn dummy_hash() -> Result<&'static str, BcryptError> {
    DUMMY_HASH
        .get_or_try_init(|| hash(DUMMY_SECRET, DEFAULT_COST))
        .map(String::as_str)
}

/// Looks up `username` and checks `password` against the stored hash.
///
/// Unknown usernames and over-long secrets still pay for one bcrypt
/// verification so response times do not reveal which accounts exist.
pub async fn verify_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    let user = match user {
        Some(user) if password.len() <= MAX_PASSWORD_BYTES => user,
        Some(_) => {
            info!("Over-long password for user: {}", username);
            verify(password, dummy_hash()?)?;
            return Ok(None);
        }
        None => {
            info!("Unknown username: {}", username);
            verify(password, dummy_hash()?)?;
            return Ok(None);
        }
    };

    match verify(password, &user.password_hash) {
        Ok(true) => Ok(Some(user)),
        Ok(false) => {
            info!("Invalid password for user: {}", username);
            Ok(None)
        }
        Err(e) => {
            error!("Stored password hash for user {} is unreadable: {}", username, e);
            Err(ApiError::PasswordHash(e))
        }
    }
}

/// Resolves the caller from Basic credentials.
pub async fn authenticate(pool: &SqlitePool, req: &HttpRequest) -> ApiResult<User> {
    let credentials = basic_credentials(req).ok_or(ApiError::AuthenticationRequired)?;
    verify_credentials(pool, &credentials.username, &credentials.password)
        .await?
        .ok_or(ApiError::AuthenticationFailed)
}

/// Like [`authenticate`], but the caller must also hold the admin role.
pub async fn authorize_admin(pool: &SqlitePool, req: &HttpRequest) -> ApiResult<User> {
    let user = authenticate(pool, req).await?;
    if !user.is_admin() {
        info!("User {} is not an admin", user.username);
        return Err(ApiError::AuthorizationFailed);
    }
    Ok(user)
}

/// Admins reach every task, everyone else only the tasks assigned to them.
/// Ownership alone grants nothing.
pub fn can_access_task(user: &User, task: &Task) -> bool {
    user.is_admin() || task.assignee == user.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use actix_web::test::TestRequest;

    fn header_for(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            username: format!("user{}", id),
            password_hash: String::new(),
            role,
        }
    }

    fn task(assignee: i64, owner: i64) -> Task {
        Task {
            id: 1,
            title: "T1".into(),
            description: "".into(),
            assignee,
            owner,
            group_id: 1,
            done: false,
        }
    }

    #[test]
    fn parses_basic_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, header_for("alice:pw")))
            .to_http_request();
        assert_eq!(
            basic_credentials(&req),
            Some(Credentials {
                username: "alice".into(),
                password: "pw".into()
            })
        );
    }

    #[test]
    fn secret_may_contain_colons() {
        let creds = parse_basic(&header_for("alice:a:b")).unwrap();
        assert_eq!(creds.password, "a:b");
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(basic_credentials(&TestRequest::default().to_http_request()), None);
        assert_eq!(parse_basic("Bearer abc"), None);
        assert_eq!(parse_basic("Basic !!!not-base64"), None);
        assert_eq!(parse_basic(&header_for("alice")), None);
        assert_eq!(parse_basic(&header_for(":pw")), None);
        assert_eq!(parse_basic(&header_for("alice:")), None);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = format!("basic {}", STANDARD.encode("bob:pw"));
        assert_eq!(parse_basic(&value).unwrap().username, "bob");
    }

    #[test]
    fn admin_reaches_any_task() {
        assert!(can_access_task(&user(1, Role::Admin), &task(2, 3)));
    }

    #[test]
    fn assignee_reaches_own_task() {
        assert!(can_access_task(&user(2, Role::User), &task(2, 1)));
    }

    #[test]
    fn owner_alone_is_not_enough() {
        assert!(!can_access_task(&user(3, Role::User), &task(2, 3)));
    }
}
