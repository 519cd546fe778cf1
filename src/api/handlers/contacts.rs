//! Contact API handlers.

use crate::api::doc::ACCOUNT_TAG;
use crate::api::dto::{ContactResponse, CreateContactRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates contact routes.
///
/// Routes:
/// - GET /         - List contacts
/// - POST /        - Create contact
/// - DELETE /:id   - Delete contact
pub fn contact_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_contacts))
        .routes(routes!(create_contact))
        .routes(routes!(delete_contact))
}

/// GET /api/contacts - List contacts
#[utoipa::path(
    get,
    path = "",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "List of contacts", body = Vec<ContactResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_contacts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<ContactResponse>>> {
    let contacts = state.services.account.list_contacts(auth_user.user_id).await?;

    let responses: Vec<ContactResponse> =
        contacts.into_iter().map(ContactResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/contacts - Create contact
#[utoipa::path(
    post,
    path = "",
    tag = ACCOUNT_TAG,
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Invalid request")
    ),
    security(("bearerAuth" = []))
)]
async fn create_contact(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    let contact = state
        .services
        .account
        .create_contact(auth_user.user_id, payload.name, &payload.phone)
        .await?;
    Ok((StatusCode::CREATED, Json(ContactResponse::from(contact))))
}

/// DELETE /api/contacts/:id - Delete contact
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ACCOUNT_TAG,
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 404, description = "Contact not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_contact(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .account
        .delete_contact(auth_user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
