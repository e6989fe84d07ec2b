//! Driven port for menu item persistence.

use async_trait::async_trait;

use crate::domain::{MenuItem, MenuItemDraft, MenuItemId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by menu item repository adapters.
    pub enum MenuItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "menu item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "menu item repository query failed: {message}",
        /// Another menu item already uses this title.
        DuplicateTitle { title: String } => "menu item titled {title} already exists",
        /// The referenced category does not exist.
        UnknownCategory { category_id: i64 } => "category {category_id} does not exist",
    }
}

/// Port for storing and reading menu items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Return every menu item ordered by identifier.
    async fn list(&self) -> Result<Vec<MenuItem>, MenuItemRepositoryError>;

    /// Fetch a menu item by identifier.
    async fn find_by_id(&self, id: MenuItemId)
    -> Result<Option<MenuItem>, MenuItemRepositoryError>;

    /// Persist a new menu item.
    async fn insert(&self, draft: &MenuItemDraft) -> Result<MenuItem, MenuItemRepositoryError>;

    /// Overwrite every editable field of an existing item.
    ///
    /// Returns `None` when no item had the identifier.
    async fn update(
        &self,
        id: MenuItemId,
        draft: &MenuItemDraft,
    ) -> Result<Option<MenuItem>, MenuItemRepositoryError>;

    /// Remove a menu item. Returns `false` when no item had the identifier.
    async fn delete(&self, id: MenuItemId) -> Result<bool, MenuItemRepositoryError>;
}
