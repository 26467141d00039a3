//! Rocket assembly: routes, managed state and JSON catchers

use std::sync::Arc;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket, catch, catchers, routes};

use crate::auth::ApiKeyConfig;
use crate::constants::{
    BAD_REQUEST_MESSAGE, FORBIDDEN_MESSAGE, INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE,
    INVALID_FIELDS_MESSAGE,
};
use crate::handlers::{ApiState, clusters_for_articles, health, search};
use crate::models::ErrorBody;

/// Build the API with its state; the caller configures and launches it
pub fn api_rocket(state: ApiState, auth: Arc<ApiKeyConfig>) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .manage(auth)
        .mount("/", routes![search, clusters_for_articles, health])
        .register(
            "/",
            catchers![bad_request, forbidden, not_found, unprocessable, internal_error],
        )
}

#[catch(400)]
fn bad_request(_request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(BAD_REQUEST_MESSAGE))
}

#[catch(403)]
fn forbidden(_request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(FORBIDDEN_MESSAGE))
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(format!("{NOT_FOUND_MESSAGE}: {}", request.uri().path())))
}

/// Mistyped fields are client input errors like any other malformed body
#[catch(422)]
fn unprocessable(_request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    (Status::BadRequest, Json(ErrorBody::new(INVALID_FIELDS_MESSAGE)))
}

#[catch(500)]
fn internal_error(_request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(INTERNAL_ERROR_MESSAGE))
}
