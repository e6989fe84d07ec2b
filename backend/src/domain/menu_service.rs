//! Menu catalogue domain service.
//!
//! Implements the [`MenuCommand`] and [`MenuQuery`] driving ports over the
//! category and menu item repositories, translating persistence failures
//! into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, MenuCommand, MenuItemRepository,
    MenuItemRepositoryError, MenuQuery,
};
use crate::domain::{
    Category, CategoryId, CategoryTitle, Error, MenuItem, MenuItemDraft, MenuItemId,
    MenuItemPatch,
};

/// Menu catalogue service implementing the catalogue driving ports.
#[derive(Clone)]
pub struct MenuCatalogService<C, M> {
    categories: Arc<C>,
    menu_items: Arc<M>,
}

impl<C, M> MenuCatalogService<C, M> {
    /// Create a new service with the given repositories.
    pub fn new(categories: Arc<C>, menu_items: Arc<M>) -> Self {
        Self {
            categories,
            menu_items,
        }
    }
}

fn category_not_found(id: CategoryId) -> Error {
    Error::not_found(format!("category {id} not found"))
        .with_details(json!({ "id": id.get(), "code": "category_not_found" }))
}

fn menu_item_not_found(id: MenuItemId) -> Error {
    Error::not_found(format!("menu item {id} not found"))
        .with_details(json!({ "id": id.get(), "code": "menu_item_not_found" }))
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::Duplicate { slug } => {
            Error::conflict("a category with this title already exists").with_details(json!({
                "field": "title",
                "slug": slug,
                "code": "already_exists",
            }))
        }
    }
}

fn map_menu_item_error(error: MenuItemRepositoryError) -> Error {
    match error {
        MenuItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("menu item repository unavailable: {message}"))
        }
        MenuItemRepositoryError::Query { message } => {
            Error::internal(format!("menu item repository error: {message}"))
        }
        MenuItemRepositoryError::DuplicateTitle { title } => {
            Error::conflict("a menu item with this title already exists").with_details(json!({
                "field": "title",
                "value": title,
                "code": "already_exists",
            }))
        }
        MenuItemRepositoryError::UnknownCategory { category_id } => {
            Error::invalid_request(format!("category {category_id} does not exist")).with_details(
                json!({
                    "field": "category",
                    "value": category_id,
                    "code": "unknown_category",
                }),
            )
        }
    }
}

#[async_trait]
impl<C, M> MenuCommand for MenuCatalogService<C, M>
where
    C: CategoryRepository,
    M: MenuItemRepository,
{
    async fn create_category(&self, title: CategoryTitle) -> Result<Category, Error> {
        self.categories
            .insert(&title)
            .await
            .map_err(map_category_error)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), Error> {
        let deleted = self
            .categories
            .delete(id)
            .await
            .map_err(map_category_error)?;
        if deleted {
            Ok(())
        } else {
            Err(category_not_found(id))
        }
    }

    async fn create_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, Error> {
        self.menu_items
            .insert(&draft)
            .await
            .map_err(map_menu_item_error)
    }

    async fn replace_menu_item(
        &self,
        id: MenuItemId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, Error> {
        self.menu_items
            .update(id, &draft)
            .await
            .map_err(map_menu_item_error)?
            .ok_or_else(|| menu_item_not_found(id))
    }

    async fn patch_menu_item(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, Error> {
        let current = self.get_menu_item(id).await?;
        let draft = patch.apply_to(&current);
        self.replace_menu_item(id, draft).await
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), Error> {
        let deleted = self
            .menu_items
            .delete(id)
            .await
            .map_err(map_menu_item_error)?;
        if deleted {
            Ok(())
        } else {
            Err(menu_item_not_found(id))
        }
    }
}

#[async_trait]
impl<C, M> MenuQuery for MenuCatalogService<C, M>
where
    C: CategoryRepository,
    M: MenuItemRepository,
{
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.categories.list().await.map_err(map_category_error)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, Error> {
        self.categories
            .find_by_id(id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| category_not_found(id))
    }

    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, Error> {
        self.menu_items.list().await.map_err(map_menu_item_error)
    }

    async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, Error> {
        self.menu_items
            .find_by_id(id)
            .await
            .map_err(map_menu_item_error)?
            .ok_or_else(|| menu_item_not_found(id))
    }
}

#[cfg(test)]
#[path = "menu_service_tests.rs"]
mod tests;
