//! Menu catalogue entities: categories and menu items.
//!
//! Categories group menu items and carry a slug derived from their title at
//! creation. Menu items have a unique title, a positive [`Price`], a
//! non-negative inventory count and an optional category reference.

use std::fmt;

use super::price::Price;
use super::slug::{is_valid_slug, slugify};

/// Maximum length, in characters, of catalogue titles.
pub const TITLE_MAX: usize = 255;

/// Validation errors raised by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("title must contain at least one letter or digit")]
    TitleWithoutSlug,
    #[error("slug must contain lowercase letters, digits, or single hyphens")]
    InvalidSlug,
    #[error("inventory must not be negative")]
    NegativeInventory,
    #[error("inventory must be at most 2147483647")]
    InventoryTooLarge,
    #[error("identifier must be positive")]
    InvalidId,
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a store-assigned identifier.
            pub fn new(raw: i64) -> Result<Self, MenuValidationError> {
                if raw <= 0 {
                    return Err(MenuValidationError::InvalidId);
                }
                Ok(Self(raw))
            }

            /// Raw integer value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Store-assigned category identifier.
    CategoryId
);
numeric_id!(
    /// Store-assigned menu item identifier.
    MenuItemId
);

fn normalise_title(raw: &str) -> Result<String, MenuValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MenuValidationError::EmptyTitle);
    }
    if trimmed.chars().count() > TITLE_MAX {
        return Err(MenuValidationError::TitleTooLong { max: TITLE_MAX });
    }
    Ok(trimmed.to_owned())
}

/// Trimmed, non-empty category title with its derived slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTitle {
    title: String,
    slug: String,
}

impl CategoryTitle {
    /// Validate a title and derive its slug.
    ///
    /// # Examples
    /// ```
    /// use little_lemon::domain::CategoryTitle;
    ///
    /// let title = CategoryTitle::new(" Hot Drinks ").expect("valid title");
    /// assert_eq!(title.as_str(), "Hot Drinks");
    /// assert_eq!(title.slug(), "hot-drinks");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MenuValidationError> {
        let title = normalise_title(raw.as_ref())?;
        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(MenuValidationError::TitleWithoutSlug);
        }
        Ok(Self { title, slug })
    }

    /// Title text.
    pub fn as_str(&self) -> &str {
        self.title.as_str()
    }

    /// URL-safe slug derived from the title.
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

/// Menu category.
///
/// ## Invariants
/// - `slug` equals the slug derived from `title` when the category was
///   created and is never supplied by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    title: String,
    slug: String,
}

impl Category {
    /// Build a category from a freshly validated title.
    pub fn new(id: CategoryId, title: CategoryTitle) -> Self {
        let CategoryTitle { title, slug } = title;
        Self { id, title, slug }
    }

    /// Rebuild a category from stored columns, validating the slug shape.
    pub fn from_stored(
        id: CategoryId,
        title: String,
        slug: String,
    ) -> Result<Self, MenuValidationError> {
        if !is_valid_slug(&slug) {
            return Err(MenuValidationError::InvalidSlug);
        }
        Ok(Self { id, title, slug })
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

/// Trimmed, non-empty menu item title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemTitle(String);

impl MenuItemTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MenuValidationError> {
        normalise_title(raw.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MenuItemTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Units of a menu item in stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Inventory(i32);

impl Inventory {
    pub fn new(count: i64) -> Result<Self, MenuValidationError> {
        if count < 0 {
            return Err(MenuValidationError::NegativeInventory);
        }
        i32::try_from(count)
            .map(Self)
            .map_err(|_| MenuValidationError::InventoryTooLarge)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Complete set of client-editable menu item fields.
///
/// Used for creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemDraft {
    pub title: MenuItemTitle,
    pub price: Price,
    pub inventory: Inventory,
    pub category: Option<CategoryId>,
}

/// Partial update to a menu item; `None` leaves the field untouched.
///
/// `category` distinguishes "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub title: Option<MenuItemTitle>,
    pub price: Option<Price>,
    pub inventory: Option<Inventory>,
    pub category: Option<Option<CategoryId>>,
}

impl MenuItemPatch {
    /// Overlay the patch onto an existing item.
    pub fn apply_to(self, item: &MenuItem) -> MenuItemDraft {
        MenuItemDraft {
            title: self.title.unwrap_or_else(|| item.title.clone()),
            price: self.price.unwrap_or(item.price),
            inventory: self.inventory.unwrap_or(item.inventory),
            category: self.category.unwrap_or(item.category),
        }
    }
}

/// Menu item offered by the restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    id: MenuItemId,
    title: MenuItemTitle,
    price: Price,
    inventory: Inventory,
    category: Option<CategoryId>,
}

impl MenuItem {
    pub fn new(id: MenuItemId, draft: MenuItemDraft) -> Self {
        let MenuItemDraft {
            title,
            price,
            inventory,
            category,
        } = draft;
        Self {
            id,
            title,
            price,
            inventory,
            category,
        }
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn title(&self) -> &MenuItemTitle {
        &self.title
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Replace every editable field with the draft's values.
    pub fn with_draft(self, draft: MenuItemDraft) -> Self {
        Self::new(self.id, draft)
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.title, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn spaghetti() -> MenuItem {
        MenuItem::new(
            MenuItemId::new(1).expect("valid id"),
            MenuItemDraft {
                title: MenuItemTitle::new("Spaghetti").expect("valid title"),
                price: "10.49".parse().expect("valid price"),
                inventory: Inventory::new(25).expect("valid inventory"),
                category: Some(CategoryId::new(3).expect("valid id")),
            },
        )
    }

    #[rstest]
    #[case("", MenuValidationError::EmptyTitle)]
    #[case("   ", MenuValidationError::EmptyTitle)]
    #[case("???", MenuValidationError::TitleWithoutSlug)]
    fn category_title_rejects_invalid_input(
        #[case] raw: &str,
        #[case] expected: MenuValidationError,
    ) {
        assert_eq!(CategoryTitle::new(raw), Err(expected));
    }

    #[rstest]
    fn titles_reject_overlong_input() {
        let raw = "a".repeat(TITLE_MAX + 1);
        assert_eq!(
            MenuItemTitle::new(&raw),
            Err(MenuValidationError::TitleTooLong { max: TITLE_MAX })
        );
    }

    #[rstest]
    fn category_slug_follows_title() {
        let id = CategoryId::new(1).expect("valid id");
        let category = Category::new(id, CategoryTitle::new("Beverages").expect("valid"));
        assert_eq!(category.slug(), "beverages");
        assert_eq!(category.title(), "Beverages");
    }

    #[rstest]
    fn stored_categories_require_valid_slugs() {
        let id = CategoryId::new(1).expect("valid id");
        let result = Category::from_stored(id, "Beverages".to_owned(), "Bad Slug".to_owned());
        assert_eq!(result, Err(MenuValidationError::InvalidSlug));
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn ids_must_be_positive(#[case] raw: i64) {
        assert_eq!(CategoryId::new(raw), Err(MenuValidationError::InvalidId));
        assert_eq!(MenuItemId::new(raw), Err(MenuValidationError::InvalidId));
    }

    #[rstest]
    fn inventory_rejects_negative_counts() {
        assert_eq!(
            Inventory::new(-1),
            Err(MenuValidationError::NegativeInventory)
        );
        assert_eq!(
            Inventory::new(i64::from(i32::MAX) + 1),
            Err(MenuValidationError::InventoryTooLarge)
        );
        assert_eq!(Inventory::default().get(), 0);
    }

    #[rstest]
    fn display_shows_title_and_price(spaghetti: MenuItem) {
        assert_eq!(spaghetti.to_string(), "Spaghetti : 10.49");
    }

    #[rstest]
    fn patch_only_overrides_supplied_fields(spaghetti: MenuItem) {
        let patch = MenuItemPatch {
            inventory: Some(Inventory::new(3).expect("valid inventory")),
            category: Some(None),
            ..MenuItemPatch::default()
        };
        let draft = patch.apply_to(&spaghetti);
        assert_eq!(draft.title, *spaghetti.title());
        assert_eq!(draft.price, spaghetti.price());
        assert_eq!(draft.inventory.get(), 3);
        assert_eq!(draft.category, None);
    }

    #[rstest]
    fn empty_patch_keeps_category(spaghetti: MenuItem) {
        let draft = MenuItemPatch::default().apply_to(&spaghetti);
        assert_eq!(draft.category, spaghetti.category());
    }
}
