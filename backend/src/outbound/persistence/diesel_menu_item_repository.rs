//! PostgreSQL-backed `MenuItemRepository` implementation using Diesel ORM.
//!
//! Prices are persisted as integer cents. Unique and foreign key violations
//! are reported as duplicate-title and unknown-category port errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MenuItemRepository, MenuItemRepositoryError};
use crate::domain::{
    CategoryId, Inventory, MenuItem, MenuItemDraft, MenuItemId, MenuItemTitle, Price,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MenuItemRow, MenuItemValues};
use super::pool::{DbPool, PoolError};
use super::schema::menu_items;

/// Diesel-backed implementation of the menu item repository port.
#[derive(Clone)]
pub struct DieselMenuItemRepository {
    pool: DbPool,
}

impl DieselMenuItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MenuItemRepositoryError {
    map_basic_pool_error(error, MenuItemRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MenuItemRepositoryError {
    map_basic_diesel_error(
        error,
        MenuItemRepositoryError::query,
        MenuItemRepositoryError::connection,
    )
}

/// Map a failed write, translating constraint violations for `draft`.
fn map_write_error(error: diesel::result::Error, draft: &MenuItemDraft) -> MenuItemRepositoryError {
    match (constraint_violation(&error), draft.category) {
        (Some(ConstraintViolation::Unique(_)), _) => {
            MenuItemRepositoryError::duplicate_title(draft.title.as_str())
        }
        (Some(violation @ ConstraintViolation::ForeignKey(_)), Some(category))
            if violation.involves("category") =>
        {
            MenuItemRepositoryError::unknown_category(category.get())
        }
        _ => map_diesel_error(error),
    }
}

fn values(draft: &MenuItemDraft) -> MenuItemValues<'_> {
    MenuItemValues {
        title: draft.title.as_str(),
        price_cents: draft.price.cents(),
        inventory: draft.inventory.get(),
        category_id: draft.category.map(CategoryId::get),
    }
}

fn corrupt(err: impl std::fmt::Display) -> MenuItemRepositoryError {
    MenuItemRepositoryError::query(format!("corrupt menu item row: {err}"))
}

fn row_to_menu_item(row: MenuItemRow) -> Result<MenuItem, MenuItemRepositoryError> {
    let MenuItemRow {
        id,
        title,
        price_cents,
        inventory,
        category_id,
    } = row;

    let draft = MenuItemDraft {
        title: MenuItemTitle::new(title).map_err(corrupt)?,
        price: Price::from_cents(price_cents).map_err(corrupt)?,
        inventory: Inventory::new(i64::from(inventory)).map_err(corrupt)?,
        category: category_id.map(CategoryId::new).transpose().map_err(corrupt)?,
    };
    Ok(MenuItem::new(MenuItemId::new(id).map_err(corrupt)?, draft))
}

#[async_trait]
impl MenuItemRepository for DieselMenuItemRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MenuItemRow> = menu_items::table
            .order(menu_items::id.asc())
            .select(MenuItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_menu_item).collect()
    }

    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = menu_items::table
            .filter(menu_items::id.eq(id.get()))
            .select(MenuItemRow::as_select())
            .first::<MenuItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_menu_item).transpose()
    }

    async fn insert(&self, draft: &MenuItemDraft) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(menu_items::table)
            .values(&values(draft))
            .returning(MenuItemRow::as_returning())
            .get_result::<MenuItemRow>(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft))?;

        row_to_menu_item(row)
    }

    async fn update(
        &self,
        id: MenuItemId,
        draft: &MenuItemDraft,
    ) -> Result<Option<MenuItem>, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(menu_items::table.filter(menu_items::id.eq(id.get())))
            .set(&values(draft))
            .returning(MenuItemRow::as_returning())
            .get_result::<MenuItemRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, draft))?;

        row.map(row_to_menu_item).transpose()
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(menu_items::table.filter(menu_items::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
