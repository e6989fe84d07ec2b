//! Driving ports for the menu catalogue.
//!
//! Inbound adapters mutate the catalogue through [`MenuCommand`] and read it
//! through [`MenuQuery`]; both return transport-agnostic domain errors.

use async_trait::async_trait;

use crate::domain::{
    Category, CategoryId, CategoryTitle, Error, MenuItem, MenuItemDraft, MenuItemId,
    MenuItemPatch,
};

/// Catalogue mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCommand: Send + Sync {
    /// Create a category; duplicate titles or slugs are conflicts.
    async fn create_category(&self, title: CategoryTitle) -> Result<Category, Error>;

    /// Delete a category, detaching it from menu items.
    async fn delete_category(&self, id: CategoryId) -> Result<(), Error>;

    /// Create a menu item; duplicate titles are conflicts.
    async fn create_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, Error>;

    /// Replace every editable field of a menu item.
    async fn replace_menu_item(
        &self,
        id: MenuItemId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, Error>;

    /// Update the supplied fields of a menu item.
    async fn patch_menu_item(&self, id: MenuItemId, patch: MenuItemPatch)
    -> Result<MenuItem, Error>;

    /// Delete a menu item.
    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), Error>;
}

/// Catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuQuery: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    async fn get_category(&self, id: CategoryId) -> Result<Category, Error>;

    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, Error>;

    async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, Error>;
}
