//! Diesel adapters exercised against embedded PostgreSQL.
//!
//! Each test starts from a freshly migrated database so constraint mapping,
//! cascades and owner scoping are checked against the real schema.

use std::future::Future;

use chrono::{TimeZone, Utc};
use little_lemon::domain::ports::{
    AuthTokenRepository, BookingRepository, CategoryRepository, CategoryRepositoryError,
    MenuItemRepository, MenuItemRepositoryError, StoredUser, UserPersistenceError,
    UserRepository,
};
use little_lemon::domain::{
    AuthToken, BookingDraft, CategoryId, CategoryTitle, GuestCount, GuestName, Inventory,
    MenuItemDraft, MenuItemTitle, PasswordHash, Price, TableNumber, User, UserId, Username,
};
use little_lemon::outbound::persistence::{
    DbPool, DieselAuthTokenRepository, DieselBookingRepository, DieselCategoryRepository,
    DieselMenuItemRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/cluster_skip.rs"]
mod cluster_skip;
#[path = "support/pg_embed.rs"]
mod pg_embed;

use cluster_skip::handle_cluster_setup_failure;
use pg_embed::{fresh_database, test_cluster};

const TEST_DB: &str = "little_lemon_repositories";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    database_url: String,
    pool: DbPool,
}

impl TestContext {
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn users(&self) -> DieselUserRepository {
        DieselUserRepository::new(self.pool.clone())
    }

    fn seed_user(&self, username: &str) -> UserId {
        let stored = StoredUser {
            user: User::new(
                UserId::random(),
                Username::new(username).expect("valid username"),
                None,
            ),
            password_hash: PasswordHash::derive_with("lemon-tart", 1),
        };
        self.block_on(self.users().insert(&stored))
            .expect("seed user");
        stored.user.id().clone()
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = fresh_database(&cluster, TEST_DB)?;
    run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str()).with_max_size(2);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        database_url,
        pool,
    })
}

#[fixture]
fn db() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn menu_draft(title: &str, category: Option<CategoryId>) -> MenuItemDraft {
    MenuItemDraft {
        title: MenuItemTitle::new(title).expect("valid title"),
        price: Price::from_cents(1049).expect("valid price"),
        inventory: Inventory::new(3).expect("valid inventory"),
        category,
    }
}

fn booking_draft(name: &str, guests: i64) -> BookingDraft {
    BookingDraft {
        name: GuestName::new(name).expect("valid name"),
        table_number: TableNumber::new(4).expect("valid table"),
        no_of_guests: GuestCount::new(guests).expect("valid guest count"),
        booking_date: Utc
            .with_ymd_and_hms(2026, 7, 4, 19, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[rstest]
fn migrations_can_be_reapplied(db: Option<TestContext>) {
    let Some(context) = db else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_can_be_reapplied skipped");
        return;
    };

    run_pending_migrations(&context.database_url).expect("second run is a no-op");
}

#[rstest]
fn users_are_unique_by_username(db: Option<TestContext>) {
    let Some(context) = db else {
        eprintln!("SKIP-TEST-CLUSTER: users_are_unique_by_username skipped");
        return;
    };
    let users = context.users();
    let id = context.seed_user("ada");

    let username = Username::new("ada").expect("valid username");
    let found = context
        .block_on(users.find_by_username(&username))
        .expect("lookup")
        .expect("user stored");
    assert_eq!(found.user.id(), &id);
    assert!(found.password_hash.verify("lemon-tart"));

    let clash = StoredUser {
        user: User::new(UserId::random(), username, None),
        password_hash: PasswordHash::derive_with("another-pass", 1),
    };
    let err = context
        .block_on(users.insert(&clash))
        .expect_err("duplicate username");
    assert_eq!(err, UserPersistenceError::duplicate_username("ada"));
}

#[rstest]
fn deleting_a_category_detaches_its_menu_items(db: Option<TestContext>) {
    let Some(context) = db else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_category_detaches_its_menu_items skipped");
        return;
    };
    let categories = DieselCategoryRepository::new(context.pool.clone());
    let menu = DieselMenuItemRepository::new(context.pool.clone());

    let title = CategoryTitle::new("Mains").expect("valid title");
    let mains = context
        .block_on(categories.insert(&title))
        .expect("insert category");
    let err = context
        .block_on(categories.insert(&title))
        .expect_err("duplicate category");
    assert!(matches!(err, CategoryRepositoryError::Duplicate { .. }));

    let item = context
        .block_on(menu.insert(&menu_draft("Spaghetti", Some(mains.id()))))
        .expect("insert item");
    assert_eq!(item.category(), Some(mains.id()));

    assert!(
        context
            .block_on(categories.delete(mains.id()))
            .expect("delete category")
    );
    let reloaded = context
        .block_on(menu.find_by_id(item.id()))
        .expect("lookup")
        .expect("item survives");
    assert_eq!(reloaded.category(), None);
}

#[rstest]
fn menu_item_constraints_map_to_port_errors(db: Option<TestContext>) {
    let Some(context) = db else {
        eprintln!("SKIP-TEST-CLUSTER: menu_item_constraints_map_to_port_errors skipped");
        return;
    };
    let menu = DieselMenuItemRepository::new(context.pool.clone());

    context
        .block_on(menu.insert(&menu_draft("Spaghetti", None)))
        .expect("insert item");
    let duplicate = context
        .block_on(menu.insert(&menu_draft("Spaghetti", None)))
        .expect_err("duplicate title");
    assert_eq!(
        duplicate,
        MenuItemRepositoryError::duplicate_title("Spaghetti")
    );

    let missing = CategoryId::new(999).expect("valid id");
    let orphan = context
        .block_on(menu.insert(&menu_draft("Lasagne", Some(missing))))
        .expect_err("unknown category");
    assert_eq!(orphan, MenuItemRepositoryError::unknown_category(999));
}

#[rstest]
fn bookings_are_scoped_to_their_owner(db: Option<TestContext>) {
    let Some(context) = db else {
        eprintln!("SKIP-TEST-CLUSTER: bookings_are_scoped_to_their_owner skipped");
        return;
    };
    let bookings = DieselBookingRepository::new(context.pool.clone());
    let alice = context.seed_user("alice");
    let bob = context.seed_user("bob");

    let booking = context
        .block_on(bookings.insert(&alice, &booking_draft("Alice", 2)))
        .expect("insert booking");

    assert!(
        context
            .block_on(bookings.list_for_owner(&bob))
            .expect("list")
            .is_empty()
    );
    assert_eq!(
        context
            .block_on(bookings.find_for_owner(&bob, booking.id()))
            .expect("lookup"),
        None
    );
    assert_eq!(
        context
            .block_on(bookings.update_for_owner(&bob, booking.id(), &booking_draft("Bob", 6)))
            .expect("update"),
        None
    );
    assert!(
        !context
            .block_on(bookings.delete_for_owner(&bob, booking.id()))
            .expect("delete")
    );

    let updated = context
        .block_on(bookings.update_for_owner(&alice, booking.id(), &booking_draft("Alice", 5)))
        .expect("update")
        .expect("owner sees booking");
    assert_eq!(updated.no_of_guests().get(), 5);
    assert_eq!(updated.booking_date(), booking.booking_date());
    assert!(
        context
            .block_on(bookings.delete_for_owner(&alice, booking.id()))
            .expect("delete")
    );
}

#[rstest]
fn a_new_token_replaces_the_previous_one(db: Option<TestContext>) {
    let Some(context) = db else {
        eprintln!("SKIP-TEST-CLUSTER: a_new_token_replaces_the_previous_one skipped");
        return;
    };
    let tokens = DieselAuthTokenRepository::new(context.pool.clone());
    let ada = context.seed_user("ada");
    let first = AuthToken::generate().digest();
    let second = AuthToken::generate().digest();

    context
        .block_on(tokens.replace(&first, &ada))
        .expect("first token");
    context
        .block_on(tokens.replace(&second, &ada))
        .expect("second token");

    assert_eq!(
        context.block_on(tokens.find_user(&first)).expect("lookup"),
        None
    );
    assert_eq!(
        context.block_on(tokens.find_user(&second)).expect("lookup"),
        Some(ada)
    );
    assert!(
        !context
            .block_on(tokens.delete(&first))
            .expect("delete stale token")
    );
}
