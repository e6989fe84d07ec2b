//! Driven port for category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, CategoryTitle};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
        /// Another category already uses this title or slug.
        Duplicate { slug: String } => "category with slug {slug} already exists",
    }
}

/// Port for storing and reading menu categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Return every category ordered by identifier.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch a category by identifier.
    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// Persist a new category and return it with its assigned identifier.
    async fn insert(&self, title: &CategoryTitle) -> Result<Category, CategoryRepositoryError>;

    /// Remove a category, clearing it from menu items that reference it.
    ///
    /// Returns `false` when no category had the identifier.
    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError>;
}
