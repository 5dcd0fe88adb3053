//! Users API routes

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{AddressPatch, ListUsersQuery, NewUser, UserPatch},
    state::AppState,
};

/// Create the router for the users API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/:id/addresses", get(get_user_addresses))
        .route(
            "/users/:id/addresses/:address_id",
            get(get_user_address).put(update_address),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "users-api"
    }))
}

/// Get all users, optionally sorted
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let users = state
        .user_manager
        .list_users(query.sorted_by.as_deref())
        .await;

    Json(users)
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(new_user) = payload?;
    let user = state.user_manager.create_user(new_user).await;
    info!("Created user {}", user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_manager
        .get_user(id)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user))
}

/// Partially update a user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(patch) = payload?;
    let user = state
        .user_manager
        .patch_user(id, patch)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user))
}

/// Delete a user by ID
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    if state.user_manager.delete_user(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Get the addresses of a user
pub async fn get_user_addresses(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<impl IntoResponse> {
    let addresses = state
        .user_manager
        .get_addresses(id)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(Json(addresses))
}

/// Get one address of a user
pub async fn get_user_address(
    State(state): State<AppState>,
    Path((id, address_id)): Path<(u64, u64)>,
) -> ApiResult<impl IntoResponse> {
    let address = state
        .user_manager
        .get_address(id, address_id)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(Json(address))
}

/// Update one address of a user
pub async fn update_address(
    State(state): State<AppState>,
    Path((id, address_id)): Path<(u64, u64)>,
    payload: Result<Json<AddressPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(patch) = payload?;
    let address = state
        .user_manager
        .patch_address(id, address_id, patch)
        .await
        .ok_or(ApiError::NotFound)?;

    Ok(Json(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::UserRepository;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(UserRepository::with_seed_data()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.expect("router response");
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        (status, body.to_vec())
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(app(), empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let (status, body) = send(app(), empty_request("GET", "/users/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send(app(), json_request("POST", "/users", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).expect("json body");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_fields_are_unprocessable() {
        let (status, _) = send(
            app(),
            json_request("POST", "/users", r#"{"email": "x@mail.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_user_omits_password() {
        let (status, body) = send(app(), empty_request("GET", "/users/123")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["email"], "user1@mail.com");
        assert_eq!(json["createdAt"], "01-01-2024 00:00:00");
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_get_single_address() {
        let (status, body) = send(app(), empty_request("GET", "/users/124/addresses/3")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["countryCode"], "ES");

        let (status, _) = send(app(), empty_request("GET", "/users/124/addresses/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
