use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::PgConnection;

use lodgeseed_core::config::{Multipliers, SeedConfig, TimeWindow};
use lodgeseed_core::lookup::{ConversationRef, CustomerMethod, PricedListing};

/// The shipped schema, dropped and recreated on every run.
pub const SCHEMA_SQL: &str = include_str!("../../../sql/01_schema.sql");

/// Environment variable naming the database used by integration tests.
pub const TEST_DATABASE_URL_VAR: &str = "TEST_DATABASE_URL";

/// Small, reproducible seed parameters for tests.
pub fn fixed_config() -> SeedConfig {
    SeedConfig {
        rows: 12,
        admin_count: 2,
        window: TimeWindow::new(
            timestamp(2023, 1, 1, 0, 0, 0),
            timestamp(2024, 12, 31, 0, 0, 0),
        )
        .expect("fixture window is valid"),
        password_length: 16,
        multipliers: Multipliers {
            images: 3,
            messages: 2,
        },
        rng_seed: Some(42),
    }
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("fixture timestamp is valid")
}

/// `TEST_DATABASE_URL`, if set. Database tests skip themselves otherwise.
pub fn test_database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL_VAR).ok()
}

/// Drop and recreate every marketplace table.
pub async fn reset_schema(conn: &mut PgConnection) {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&mut *conn)
        .await
        .expect("schema reset failed");
}

/// Ids `1..=n`, the shape identity columns produce after a truncate.
pub fn id_range(n: i64) -> Vec<i64> {
    (1..=n).collect()
}

/// Listings with prices spread across the catalogue range.
pub fn priced_listings(n: i64) -> Vec<PricedListing> {
    (1..=n)
        .map(|id| PricedListing {
            id,
            price_cents: (50 + (id as i32 * 37) % 451) * 100,
        })
        .collect()
}

/// One payment method per customer, customer `i` owning method `100 + i`.
pub fn customer_methods(customer_ids: &[i64]) -> Vec<CustomerMethod> {
    customer_ids
        .iter()
        .map(|&customer_id| CustomerMethod {
            customer_id,
            payment_method_id: 100 + customer_id,
        })
        .collect()
}

/// Conversations opened a day apart from the start of `window`.
pub fn conversations(config: &SeedConfig, n: i64) -> Vec<ConversationRef> {
    (1..=n)
        .map(|id| ConversationRef {
            id,
            created_at: config.window.start + chrono::Duration::days(id),
        })
        .collect()
}
