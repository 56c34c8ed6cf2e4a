//! School endpoints
//!
//! - `GET /api/schools[?q=]` lists schools newest first
//! - `POST /api/schools` takes a multipart form with an `image` file
//! - anything else is 405 with `Allow: GET, POST`

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::QueryRejection,
        DefaultBodyLimit, Query, State,
    },
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::demo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{NewSchool, SchoolForm, SchoolSummary, SearchParams, ValidationError};

/// Multipart field carrying the uploaded file
const IMAGE_FIELD: &str = "image";

/// Listing response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub ok: bool,
    pub data: Vec<SchoolSummary>,
}

/// Successful submission response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub message: &'static str,
    pub id: i64,
    pub image: String,
}

/// Uploaded file as received
struct Upload {
    file_name: Option<String>,
    bytes: Bytes,
}

/// Everything read from a submission body
#[derive(Default)]
struct Submission {
    form: SchoolForm,
    image: Option<Upload>,
}

/// GET /api/schools - list schools
async fn list_schools(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(params) = query?;
    let search = params.term();

    let data = if state.config.serves_static_listing() {
        demo::schools()
            .into_iter()
            .filter(|s| search.as_ref().map_or(true, |term| term.matches(s)))
            .collect()
    } else {
        state.store.list(search.as_ref()).await?
    };

    tracing::debug!(count = data.len(), search = ?search.as_ref().map(|t| t.as_str()), "Listed schools");
    Ok(Json(ListResponse { ok: true, data }))
}

/// POST /api/schools - add a school
async fn create_school(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    // Checked before the body is read, so payload validity never matters
    if state.config.read_only {
        return Err(ApiError::ReadOnly);
    }

    let mut multipart = multipart?;
    let submission = read_submission(&mut multipart).await?;

    let school = NewSchool::from_form(&submission.form)?;
    let upload = submission.image.ok_or(ValidationError::MissingImage)?;

    let image = state
        .images
        .save(upload.file_name.as_deref(), &upload.bytes)
        .await?;

    let id = match state.store.insert(&school, &image.url).await {
        Ok(id) => id,
        Err(e) => {
            state.images.discard(&image).await;
            return Err(e.into());
        }
    };

    tracing::info!(id, name = %school.name, image = %image.url, "Created school");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            ok: true,
            message: "School created successfully",
            id,
            image: image.url,
        }),
    ))
}

/// Fallback for unsupported methods on /api/schools
async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
    }
}

/// Drain the multipart stream into text fields and the first non-empty image.
async fn read_submission(multipart: &mut Multipart) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();

        if name == IMAGE_FIELD {
            let is_file = field.file_name().is_some() || field.content_type().is_some();
            let file_name = field.file_name().map(str::to_owned);
            let bytes = field.bytes().await?;

            if is_file && !bytes.is_empty() && submission.image.is_none() {
                submission.image = Some(Upload { file_name, bytes });
            }
        } else {
            let value = field.text().await?;
            if !submission.form.set(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(submission)
}

/// School routes
pub fn router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/schools",
        get(list_schools)
            .post(create_school)
            .fallback(method_not_allowed)
            .layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}
