use serde::{Deserialize, Serialize};
use time::Date;

use crate::auth::repo::User;

/// Request body for POST /api/auth/signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub nome: String,
    #[serde(rename = "dataNascimento", with = "birth_date")]
    pub data_nascimento: Date,
    pub email: String,
    pub senha: String,
    #[serde(rename = "confirmacaoSenha")]
    pub confirmacao_senha: String,
}

/// Request body for POST /api/auth/signin.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client. Never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub nome: String,
    #[serde(rename = "dataNascimento", with = "birth_date")]
    pub data_nascimento: Date,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            data_nascimento: u.data_nascimento,
            email: u.email,
        }
    }
}

/// Birth dates travel as "YYYY-MM-DD"; mobile clients also send full
/// RFC 3339 timestamps, so parsing accepts both and keeps only the date.
pub(crate) mod birth_date {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use time::{
        format_description::{well_known::Rfc3339, FormatItem},
        macros::format_description,
        Date, OffsetDateTime,
    };

    const DATE_FMT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let out = date.format(DATE_FMT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&out)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = Date::parse(&raw, DATE_FMT) {
            return Ok(date);
        }
        OffsetDateTime::parse(&raw, &Rfc3339)
            .map(|dt| dt.date())
            .map_err(|_| D::Error::custom(format!("não foi possível analisar a data: {raw}")))
    }
}
