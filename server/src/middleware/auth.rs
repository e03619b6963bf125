//! Bearer-token authentication middleware

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::auth::AuthService;
use crate::error::AppError;
use crate::models::User;

/// User resolved from the request's token, inserted as a request extension
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Reject the request unless it carries a valid bearer token for an
/// existing user.
///
/// A missing or non-Bearer `Authorization` header is a 401; a token that
/// fails signature or expiry checks is a 403; a token naming a deleted user
/// is a 404. None of these reach the handler.
pub async fn require_auth(
    State(auth): State<Arc<AuthService>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::MissingToken)?;

    let user = auth.verify(bearer.token()).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
