use crate::error::Result;
use crate::model::{CreateLinkRequest, LinkResponse, ListLinksResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tinylink_core::{RegistryError, ShortCode, ShortLink};
use tinylink_registry::{render_png, DEFAULT_QR_SIZE};

/// First path segments owned by other routes. A custom code equal to one of
/// these would never reach the redirect route.
pub const RESERVED_CODES: &[&str] = &["health", "v1"];

fn check_routable(code: &str) -> std::result::Result<(), RegistryError> {
    if code.contains('/') {
        return Err(RegistryError::InvalidInput(format!(
            "custom code {code:?} must not contain '/'"
        )));
    }
    if RESERVED_CODES.contains(&code) {
        return Err(RegistryError::InvalidInput(format!(
            "custom code {code:?} is reserved"
        )));
    }
    Ok(())
}

pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>)> {
    if let Some(code) = &request.custom_code {
        check_routable(code)?;
    }
    let link = state.registry.shorten(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<ListLinksResponse>> {
    let links = state
        .registry
        .list()
        .await?
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url))
        .collect();
    Ok(Json(ListLinksResponse { links }))
}

pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>> {
    let link = find(&state, code).await?;
    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Renders the short URL of `code` as a PNG QR code.
pub async fn qr_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let link = find(&state, code).await?;
    let png = render_png(&link.code.to_url(&state.base_url), DEFAULT_QR_SIZE)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let code = ShortCode::new(code)?;
    state.registry.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Answers `302 Found` and counts the click in the background.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let link = find(&state, code).await?;

    state.clicks.dispatch(link.code);
    Ok((StatusCode::FOUND, [(header::LOCATION, link.target)]))
}

async fn find(state: &AppState, code: String) -> Result<ShortLink> {
    let code = ShortCode::new(code)?;
    let link = state
        .registry
        .resolve(&code)
        .await?
        .ok_or_else(|| RegistryError::NotFound(code.to_string()))?;
    Ok(link)
}
