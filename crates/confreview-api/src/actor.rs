//! Extraction of the acting user from request headers.
//!
//! Authentication happens upstream; the gateway forwards the verified user
//! id and role in `x-user-id` and `x-user-role`.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use confreview_core::authorization::{Actor, Role};
use uuid::Uuid;

use crate::error::ErrorBody;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the acting user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated actor of the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

/// Rejection returned when the actor headers are missing or malformed.
#[derive(Debug)]
pub struct MissingActor(String);

impl IntoResponse for MissingActor {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: "unauthenticated",
            message: self.0,
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, MissingActor> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| MissingActor(format!("missing {name} header")))?
        .to_str()
        .map_err(|_| MissingActor(format!("malformed {name} header")))
}

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = MissingActor;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id: Uuid = header(parts, USER_ID_HEADER)?
            .trim()
            .parse()
            .map_err(|_| MissingActor(format!("malformed {USER_ID_HEADER} header")))?;
        let role: Role = header(parts, USER_ROLE_HEADER)?
            .parse()
            .map_err(|_| MissingActor(format!("malformed {USER_ROLE_HEADER} header")))?;
        Ok(Self(Actor::new(user_id, role)))
    }
}
