//! In-memory menu catalogue store backing both catalogue repositories.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, MenuItemRepository, MenuItemRepositoryError,
};
use crate::domain::{
    Category, CategoryId, CategoryTitle, MenuItem, MenuItemDraft, MenuItemId, MenuItemPatch,
};

#[derive(Default)]
struct CatalogueState {
    categories: BTreeMap<CategoryId, Category>,
    items: BTreeMap<MenuItemId, MenuItem>,
    last_category_id: i64,
    last_item_id: i64,
}

impl CatalogueState {
    fn check_item(
        &self,
        draft: &MenuItemDraft,
        exclude: Option<MenuItemId>,
    ) -> Result<(), MenuItemRepositoryError> {
        if let Some(category) = draft.category.filter(|id| !self.categories.contains_key(id)) {
            return Err(MenuItemRepositoryError::unknown_category(category.get()));
        }
        let taken = self
            .items
            .values()
            .any(|item| Some(item.id()) != exclude && item.title() == &draft.title);
        if taken {
            return Err(MenuItemRepositoryError::duplicate_title(
                draft.title.as_str(),
            ));
        }
        Ok(())
    }
}

/// Menu catalogue kept in process memory.
///
/// Implements [`CategoryRepository`] and [`MenuItemRepository`] over a single
/// lock so category deletion can clear item references atomically.
#[derive(Default)]
pub struct InMemoryCatalogue {
    state: Mutex<CatalogueState>,
}

impl InMemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogue {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = lock(&self.state).map_err(CategoryRepositoryError::query)?;
        Ok(state.categories.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let state = lock(&self.state).map_err(CategoryRepositoryError::query)?;
        Ok(state.categories.get(&id).cloned())
    }

    async fn insert(&self, title: &CategoryTitle) -> Result<Category, CategoryRepositoryError> {
        let mut state = lock(&self.state).map_err(CategoryRepositoryError::query)?;
        let clash = state
            .categories
            .values()
            .any(|existing| existing.slug() == title.slug() || existing.title() == title.as_str());
        if clash {
            return Err(CategoryRepositoryError::duplicate(title.slug()));
        }
        let id = CategoryId::new(state.last_category_id + 1)
            .map_err(|err| CategoryRepositoryError::query(err.to_string()))?;
        state.last_category_id = id.get();
        let category = Category::new(id, title.clone());
        state.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut state = lock(&self.state).map_err(CategoryRepositoryError::query)?;
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for item in state.items.values_mut() {
            if item.category() == Some(id) {
                let cleared = MenuItemPatch {
                    category: Some(None),
                    ..MenuItemPatch::default()
                }
                .apply_to(item);
                *item = item.clone().with_draft(cleared);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryCatalogue {
    async fn list(&self) -> Result<Vec<MenuItem>, MenuItemRepositoryError> {
        let state = lock(&self.state).map_err(MenuItemRepositoryError::query)?;
        Ok(state.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuItemRepositoryError> {
        let state = lock(&self.state).map_err(MenuItemRepositoryError::query)?;
        Ok(state.items.get(&id).cloned())
    }

    async fn insert(&self, draft: &MenuItemDraft) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut state = lock(&self.state).map_err(MenuItemRepositoryError::query)?;
        state.check_item(draft, None)?;
        let id = MenuItemId::new(state.last_item_id + 1)
            .map_err(|err| MenuItemRepositoryError::query(err.to_string()))?;
        state.last_item_id = id.get();
        let item = MenuItem::new(id, draft.clone());
        state.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: MenuItemId,
        draft: &MenuItemDraft,
    ) -> Result<Option<MenuItem>, MenuItemRepositoryError> {
        let mut state = lock(&self.state).map_err(MenuItemRepositoryError::query)?;
        if !state.items.contains_key(&id) {
            return Ok(None);
        }
        state.check_item(draft, Some(id))?;
        let item = MenuItem::new(id, draft.clone());
        state.items.insert(id, item.clone());
        Ok(Some(item))
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool, MenuItemRepositoryError> {
        let mut state = lock(&self.state).map_err(MenuItemRepositoryError::query)?;
        Ok(state.items.remove(&id).is_some())
    }
}
