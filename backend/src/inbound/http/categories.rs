//! Menu category handlers.
//!
//! ```text
//! GET    /restaurant/categories/
//! POST   /restaurant/categories/        {"title":"Beverages"}
//! GET    /restaurant/categories/{id}/
//! DELETE /restaurant/categories/{id}/
//! ```
//!
//! Reads are public; mutations need an auth token.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Category, CategoryId, CategoryTitle, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error};

const TITLE: FieldName = FieldName::new("title");

/// Request body for `POST /restaurant/categories/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CategoryRequest {
    /// Display title; the slug is derived from it.
    #[schema(example = "Beverages")]
    pub title: String,
}

/// Category as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Beverages")]
    pub title: String,
    #[schema(example = "beverages")]
    pub slug: String,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().get(),
            title: category.title().to_owned(),
            slug: category.slug().to_owned(),
        }
    }
}

/// Path ids that can never be assigned are simply absent.
fn category_id(raw: i64) -> ApiResult<CategoryId> {
    CategoryId::new(raw).map_err(|_| {
        Error::not_found(format!("category {raw} not found"))
            .with_details(json!({ "id": raw, "code": "category_not_found" }))
    })
}

/// List every category ordered by id.
#[utoipa::path(
    get,
    path = "/restaurant/categories/",
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "listCategories",
    security([])
)]
#[get("/restaurant/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.menu_query.list_categories().await?;
    Ok(web::Json(
        categories.iter().map(CategoryResponse::from).collect(),
    ))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/restaurant/categories/",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid title", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Title or slug already used", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "createCategory"
)]
#[post("/restaurant/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let title = CategoryTitle::new(&payload.title).map_err(|err| invalid_field_error(TITLE, err))?;
    let category = state.menu.create_category(title).await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(&category)))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/restaurant/categories/{id}/",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "getCategory",
    security([])
)]
#[get("/restaurant/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let id = category_id(path.into_inner())?;
    let category = state.menu_query.get_category(id).await?;
    Ok(web::Json(CategoryResponse::from(&category)))
}

/// Delete a category; its menu items become uncategorised.
#[utoipa::path(
    delete,
    path = "/restaurant/categories/{id}/",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "deleteCategory"
)]
#[delete("/restaurant/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = category_id(path.into_inner())?;
    state.menu.delete_category(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
