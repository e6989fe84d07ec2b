//! Menu item handlers.
//!
//! ```text
//! GET    /restaurant/menu/
//! POST   /restaurant/menu/        {"title":"Tea","price":"2.50","inventory":20,"category":1}
//! GET    /restaurant/menu/{id}/
//! PUT    /restaurant/menu/{id}/
//! PATCH  /restaurant/menu/{id}/   {"price":3}
//! DELETE /restaurant/menu/{id}/
//! ```
//!
//! Prices are returned as two-decimal strings and accepted as strings or
//! numbers. `name` is accepted as an alias for `title`.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    CategoryId, Error, Inventory, MenuItem, MenuItemDraft, MenuItemId, MenuItemPatch,
    MenuItemTitle, Price,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, deserialize_some, invalid_field_error, missing_field_error, reject_null,
};

const TITLE: FieldName = FieldName::new("title");
const PRICE: FieldName = FieldName::new("price");
const INVENTORY: FieldName = FieldName::new("inventory");
const CATEGORY: FieldName = FieldName::new("category");

/// Price as sent by clients: `"2.50"` or `2.5`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn parse(&self) -> Result<Price, Error> {
        let parsed = match self {
            Self::Text(raw) => raw.parse::<Price>(),
            Self::Number(number) => number.to_string().parse::<Price>(),
        };
        parsed.map_err(|err| invalid_field_error(PRICE, err))
    }
}

/// Request body for creating or replacing a menu item.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MenuItemRequest {
    #[serde(alias = "name")]
    #[schema(example = "Tea")]
    pub title: Option<String>,
    #[schema(value_type = String, example = "2.50")]
    pub price: Option<PriceInput>,
    /// Units in stock; defaults to zero.
    #[serde(default)]
    #[schema(example = 20)]
    pub inventory: Option<i64>,
    #[serde(default)]
    #[schema(example = 1)]
    pub category: Option<i64>,
}

/// Request body for partial menu item updates.
///
/// Absent fields are left untouched; `"category": null` clears the category.
/// The other fields reject `null`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct MenuItemPatchRequest {
    #[serde(default, alias = "name", deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>, example = "3.00")]
    pub price: Option<Option<PriceInput>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub inventory: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub category: Option<Option<i64>>,
}

/// Menu item as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Tea")]
    pub title: String,
    #[schema(example = "2.50")]
    pub price: String,
    #[schema(example = 20)]
    pub inventory: i32,
    pub category: Option<i64>,
}

impl From<&MenuItem> for MenuItemResponse {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id().get(),
            title: item.title().to_string(),
            price: item.price().to_string(),
            inventory: item.inventory().get(),
            category: item.category().map(CategoryId::get),
        }
    }
}

fn parse_title(raw: &str) -> ApiResult<MenuItemTitle> {
    MenuItemTitle::new(raw).map_err(|err| invalid_field_error(TITLE, err))
}

fn parse_inventory(raw: i64) -> ApiResult<Inventory> {
    Inventory::new(raw).map_err(|err| invalid_field_error(INVENTORY, err))
}

fn parse_category(raw: Option<i64>) -> ApiResult<Option<CategoryId>> {
    raw.map(CategoryId::new)
        .transpose()
        .map_err(|err| invalid_field_error(CATEGORY, err))
}

impl TryFrom<MenuItemRequest> for MenuItemDraft {
    type Error = Error;

    fn try_from(value: MenuItemRequest) -> Result<Self, Self::Error> {
        let title = value.title.ok_or_else(|| missing_field_error(TITLE))?;
        let price = value.price.ok_or_else(|| missing_field_error(PRICE))?;
        Ok(Self {
            title: parse_title(&title)?,
            price: price.parse()?,
            inventory: parse_inventory(value.inventory.unwrap_or_default())?,
            category: parse_category(value.category)?,
        })
    }
}

impl TryFrom<MenuItemPatchRequest> for MenuItemPatch {
    type Error = Error;

    fn try_from(value: MenuItemPatchRequest) -> Result<Self, Self::Error> {
        let title = reject_null(value.title, TITLE)?;
        let price = reject_null(value.price, PRICE)?;
        let inventory = reject_null(value.inventory, INVENTORY)?;
        Ok(Self {
            title: title.as_deref().map(parse_title).transpose()?,
            price: price.as_ref().map(PriceInput::parse).transpose()?,
            inventory: inventory.map(parse_inventory).transpose()?,
            category: value.category.map(parse_category).transpose()?,
        })
    }
}

fn menu_item_id(raw: i64) -> ApiResult<MenuItemId> {
    MenuItemId::new(raw).map_err(|_| {
        Error::not_found(format!("menu item {raw} not found"))
            .with_details(json!({ "id": raw, "code": "menu_item_not_found" }))
    })
}

/// List every menu item ordered by id.
#[utoipa::path(
    get,
    path = "/restaurant/menu/",
    responses(
        (status = 200, description = "Menu items", body = [MenuItemResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "listMenuItems",
    security([])
)]
#[get("/restaurant/menu")]
pub async fn list_menu_items(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MenuItemResponse>>> {
    let items = state.menu_query.list_menu_items().await?;
    Ok(web::Json(items.iter().map(MenuItemResponse::from).collect()))
}

/// Create a menu item.
#[utoipa::path(
    post,
    path = "/restaurant/menu/",
    request_body = MenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = MenuItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Title already used", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "createMenuItem"
)]
#[post("/restaurant/menu")]
pub async fn create_menu_item(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    payload: web::Json<MenuItemRequest>,
) -> ApiResult<HttpResponse> {
    let draft = MenuItemDraft::try_from(payload.into_inner())?;
    let item = state.menu.create_menu_item(draft).await?;
    Ok(HttpResponse::Created().json(MenuItemResponse::from(&item)))
}

/// Fetch one menu item.
#[utoipa::path(
    get,
    path = "/restaurant/menu/{id}/",
    params(("id" = i64, Path, description = "Menu item identifier")),
    responses(
        (status = 200, description = "Menu item", body = MenuItemResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "getMenuItem",
    security([])
)]
#[get("/restaurant/menu/{id}")]
pub async fn get_menu_item(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MenuItemResponse>> {
    let id = menu_item_id(path.into_inner())?;
    let item = state.menu_query.get_menu_item(id).await?;
    Ok(web::Json(MenuItemResponse::from(&item)))
}

/// Replace every field of a menu item.
#[utoipa::path(
    put,
    path = "/restaurant/menu/{id}/",
    params(("id" = i64, Path, description = "Menu item identifier")),
    request_body = MenuItemRequest,
    responses(
        (status = 200, description = "Menu item replaced", body = MenuItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Title already used", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "replaceMenuItem"
)]
#[put("/restaurant/menu/{id}")]
pub async fn replace_menu_item(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<MenuItemRequest>,
) -> ApiResult<web::Json<MenuItemResponse>> {
    let id = menu_item_id(path.into_inner())?;
    let draft = MenuItemDraft::try_from(payload.into_inner())?;
    let item = state.menu.replace_menu_item(id, draft).await?;
    Ok(web::Json(MenuItemResponse::from(&item)))
}

/// Update the supplied fields of a menu item.
#[utoipa::path(
    patch,
    path = "/restaurant/menu/{id}/",
    params(("id" = i64, Path, description = "Menu item identifier")),
    request_body = MenuItemPatchRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Title already used", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "patchMenuItem"
)]
#[patch("/restaurant/menu/{id}")]
pub async fn patch_menu_item(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<MenuItemPatchRequest>,
) -> ApiResult<web::Json<MenuItemResponse>> {
    let id = menu_item_id(path.into_inner())?;
    let patch = MenuItemPatch::try_from(payload.into_inner())?;
    let item = state.menu.patch_menu_item(id, patch).await?;
    Ok(web::Json(MenuItemResponse::from(&item)))
}

/// Delete a menu item.
#[utoipa::path(
    delete,
    path = "/restaurant/menu/{id}/",
    params(("id" = i64, Path, description = "Menu item identifier")),
    responses(
        (status = 204, description = "Menu item deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "deleteMenuItem"
)]
#[delete("/restaurant/menu/{id}")]
pub async fn delete_menu_item(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = menu_item_id(path.into_inner())?;
    state.menu.delete_menu_item(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
