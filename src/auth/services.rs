use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, SignupRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::{is_unique_violation, ApiError},
};

/// Uniform login failure, whether the email is unknown or the password is
/// wrong. Distinguishing the two would allow account enumeration.
const INVALID_CREDENTIALS: &str = "email ou senha inválidos";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    if email.starts_with('.') || email.ends_with('.') {
        return false;
    }
    EMAIL_RE.is_match(email)
}

/// Validate, hash and persist a new user. Returns the stored row with the
/// email already normalized.
pub async fn signup(db: &PgPool, req: SignupRequest) -> Result<User, ApiError> {
    let email = req.email.trim();
    if email.is_empty() {
        return Err(ApiError::Validation("email é obrigatório".into()));
    }
    if !is_valid_email(email) {
        return Err(ApiError::Validation("formato de email inválido".into()));
    }
    let email = email.to_lowercase();

    let nome = req.nome.trim();
    if nome.is_empty() {
        return Err(ApiError::Validation("nome é obrigatório".into()));
    }

    let senha = req.senha.trim();
    if senha.chars().count() < 6 {
        return Err(ApiError::Validation(
            "a senha deve ter pelo menos 6 caracteres".into(),
        ));
    }
    if senha != req.confirmacao_senha.trim() {
        return Err(ApiError::Validation("as senhas não coincidem".into()));
    }

    let senha_hash = hash_password(senha).map_err(ApiError::Internal)?;

    let user = User::create(db, nome, req.data_nascimento, &email, &senha_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(email = %email, "signup with registered email");
                ApiError::Conflict("email já cadastrado".into())
            } else {
                e.into()
            }
        })?;

    info!(user_id = user.id, email = %user.email, "user signed up");
    Ok(user)
}

/// Check credentials and issue a bearer token.
pub async fn login(db: &PgPool, keys: &JwtKeys, req: LoginRequest) -> Result<AuthResponse, ApiError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::Validation("email é obrigatório".into()));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("formato de email inválido".into()));
    }

    let Some(user) = User::find_by_email(db, &email).await? else {
        warn!(email = %email, "login with unknown email");
        return Err(ApiError::Auth(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(&req.senha, &user.senha_hash).map_err(ApiError::Internal)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::Auth(INVALID_CREDENTIALS.into()));
    }

    let token = keys.sign(user.id, &user.email).map_err(ApiError::Internal)?;

    info!(user_id = user.id, "user logged in");
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}
