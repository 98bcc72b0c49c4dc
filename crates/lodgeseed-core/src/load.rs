//! # Table Loader
//!
//! Seeds one table at a time on the run's connection:
//!
//! 1. `TRUNCATE ... RESTART IDENTITY CASCADE`
//! 2. resolve parent ids through [`crate::lookup`]
//! 3. generate rows with the table's generator
//! 4. insert them with batched, parameterized multi-row `INSERT`s
//! 5. log a dump of the table when debug logging is on
//!
//! Every statement runs on the connection it is handed, which the pipeline
//! keeps inside one transaction.

use comfy_table::Table as ComfyTable;
use rand::Rng;
use sqlx::query_builder::Separated;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{debug, Level};

use crate::config::SeedConfig;
use crate::error::Result;
use crate::generate::accounts::{
    generate_accounts, generate_credentials, NewAccount, NewCredential,
};
use crate::generate::billing::{
    generate_bookings, generate_credit_cards, generate_payment_methods, generate_payments,
    generate_paypal, generate_payout_accounts, NewBooking, NewCreditCard, NewPayment,
    NewPaymentMethod, NewPayoutAccount, NewPaypal,
};
use crate::generate::listings::{
    generate_accommodation_images, generate_accommodations, generate_addresses, generate_images,
    NewAccommodation, NewAccommodationImage, NewAddress, NewImage,
};
use crate::generate::social::{
    generate_conversations, generate_messages, generate_notifications, generate_review_images,
    generate_reviews, NewConversation, NewMessage, NewNotification, NewReview, NewReviewImage,
};
use crate::lookup::{self, statement_error, IdFilter};
use crate::schema::Table;
use crate::statements;

/// Rows per multi-row `INSERT`.
const INSERT_BATCH_SIZE: usize = 100;

/// A generated row that knows its target table and how to bind its values.
pub trait InsertRow {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Bind one value per entry of `COLUMNS`, in the same order.
    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

/// Insert `rows` in batches of `INSERT_BATCH_SIZE`. Returns the row count.
pub async fn insert_rows<R: InsertRow>(conn: &mut PgConnection, rows: &[R]) -> Result<usize> {
    let prefix = statements::insert_prefix(R::TABLE, R::COLUMNS);

    for chunk in rows.chunks(INSERT_BATCH_SIZE) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(&prefix);
        builder.push_values(chunk, |mut separated, row| row.bind_values(&mut separated));
        let sql = builder.sql().to_string();

        builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(|e| statement_error(R::TABLE, "batched insert failed", &sql, e))?;
    }

    Ok(rows.len())
}

/// Empty `table`, restart its identity and cascade to dependent tables.
pub async fn truncate(conn: &mut PgConnection, table: Table) -> Result<()> {
    let sql = statements::truncate_table(table.name());
    sqlx::query(&sql)
        .execute(&mut *conn)
        .await
        .map_err(|e| statement_error(table.name(), "truncate failed", &sql, e))?;
    Ok(())
}

/// Log every row of `table` as a grid. Skipped unless debug logging is on.
pub async fn dump_table(conn: &mut PgConnection, table: Table) -> Result<()> {
    if !tracing::enabled!(Level::DEBUG) {
        return Ok(());
    }

    let sql = statements::dump_table(table.name());
    let rows: Vec<(String,)> = sqlx::query_as(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| statement_error(table.name(), "dump failed", &sql, e))?;

    let values: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|(text,)| serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
        .collect();

    debug!(table = %table, rows = values.len(), "\n{}", render_dump(&values));
    Ok(())
}

/// Render JSON row objects as a table; columns come from the first row, in
/// the order the row lists them.
pub fn render_dump(rows: &[serde_json::Value]) -> String {
    let mut grid = ComfyTable::new();
    let Some(serde_json::Value::Object(first)) = rows.first() else {
        return "(empty)".to_string();
    };

    let columns: Vec<&String> = first.keys().collect();
    grid.set_header(columns.iter().map(|c| c.as_str()));

    for row in rows {
        grid.add_row(columns.iter().map(|column| match row.get(column.as_str()) {
            None | Some(serde_json::Value::Null) => "NULL".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }));
    }

    grid.to_string()
}

/// Seed one table: truncate, generate against its parents, insert, dump.
/// Returns the number of rows inserted.
pub async fn seed_table(
    conn: &mut PgConnection,
    table: Table,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<usize> {
    truncate(conn, table).await?;

    let inserted = match table {
        Table::Accounts => seed_accounts(conn, config, rng).await?.len(),
        Table::Credentials => seed_credentials(conn, config, rng).await?.len(),
        Table::Addresses => seed_addresses(conn, config, rng).await?.len(),
        Table::Accommodations => seed_accommodations(conn, config, rng).await?.len(),
        Table::Images => seed_images(conn, config, rng).await?.len(),
        Table::PaymentMethods => seed_payment_methods(conn, config, rng).await?.len(),
        Table::CreditCards => seed_credit_cards(conn, rng).await?.len(),
        Table::Paypal => seed_paypal(conn, rng).await?.len(),
        Table::Reviews => seed_reviews(conn, config, rng).await?.len(),
        Table::Conversations => seed_conversations(conn, config, rng).await?.len(),
        Table::Messages => seed_messages(conn, config, rng).await?.len(),
        Table::ReviewImages => seed_review_images(conn, rng).await?.len(),
        Table::AccommodationImages => seed_accommodation_images(conn, rng).await?.len(),
        Table::Notifications => seed_notifications(conn, config, rng).await?.len(),
        Table::PayoutAccounts => seed_payout_accounts(conn, config, rng).await?.len(),
        Table::Payments => seed_payments(conn, config, rng).await?.len(),
        Table::Bookings => seed_bookings(conn, config, rng).await?.len(),
    };

    dump_table(conn, table).await?;
    Ok(inserted)
}

// ---------------------------------------------------------------------------
// Per-table seeding
// ---------------------------------------------------------------------------

pub async fn seed_accounts(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewAccount>> {
    let rows = generate_accounts(config, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_credentials(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewCredential>> {
    let account_ids = lookup::fetch_ids(conn, "accounts", None).await?;
    let rows = generate_credentials(config, &account_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_addresses(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewAddress>> {
    let rows = generate_addresses(config, rng);
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_accommodations(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewAccommodation>> {
    let host_ids = lookup::account_ids_with_role(conn, "host").await?;
    let address_ids = lookup::fetch_ids(conn, "addresses", None).await?;
    let rows = generate_accommodations(config, &host_ids, &address_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_images(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewImage>> {
    let rows = generate_images(config, rng);
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_payment_methods(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewPaymentMethod>> {
    let guest_ids = lookup::account_ids_with_role(conn, "guest").await?;
    let rows = generate_payment_methods(config, &guest_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_credit_cards(
    conn: &mut PgConnection,
    rng: &mut impl Rng,
) -> Result<Vec<NewCreditCard>> {
    let card_ids =
        lookup::fetch_ids(conn, "payment_methods", Some(IdFilter::eq("type", "card"))).await?;
    let rows = generate_credit_cards(&card_ids, rng);
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_paypal(conn: &mut PgConnection, rng: &mut impl Rng) -> Result<Vec<NewPaypal>> {
    let methods = lookup::paypal_method_emails(conn).await?;
    let rows = generate_paypal(&methods, rng);
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_reviews(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewReview>> {
    let accommodation_ids = lookup::fetch_ids(conn, "accommodations", None).await?;
    let guest_ids = lookup::account_ids_with_role(conn, "guest").await?;
    let rows = generate_reviews(config, &accommodation_ids, &guest_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_conversations(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewConversation>> {
    let rows = generate_conversations(config, rng);
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_messages(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewMessage>> {
    let conversations = lookup::conversations(conn).await?;
    let guest_ids = lookup::account_ids_with_role(conn, "guest").await?;
    let host_ids = lookup::account_ids_with_role(conn, "host").await?;
    let rows = generate_messages(config, &conversations, &guest_ids, &host_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_review_images(
    conn: &mut PgConnection,
    rng: &mut impl Rng,
) -> Result<Vec<NewReviewImage>> {
    let review_ids = lookup::fetch_ids(conn, "reviews", None).await?;
    let image_ids = lookup::fetch_ids(conn, "images", None).await?;
    let rows = generate_review_images(&review_ids, &image_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_accommodation_images(
    conn: &mut PgConnection,
    rng: &mut impl Rng,
) -> Result<Vec<NewAccommodationImage>> {
    let accommodation_ids = lookup::fetch_ids(conn, "accommodations", None).await?;
    let free_image_ids = lookup::fetch_ids(
        conn,
        "images",
        Some(IdFilter::not_referenced_by("review_images", "image_id")),
    )
    .await?;
    let rows = generate_accommodation_images(&accommodation_ids, &free_image_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_notifications(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewNotification>> {
    let account_ids = lookup::fetch_ids(conn, "accounts", None).await?;
    let rows = generate_notifications(config, &account_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_payout_accounts(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewPayoutAccount>> {
    let host_ids = lookup::account_ids_with_role(conn, "host").await?;
    let rows = generate_payout_accounts(config, &host_ids, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_payments(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewPayment>> {
    let customers = lookup::first_payment_methods(conn).await?;
    let listings = lookup::accommodation_prices(conn).await?;
    let rows = generate_payments(config, &customers, &listings, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

pub async fn seed_bookings(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NewBooking>> {
    let payments = lookup::payments(conn).await?;
    let listings = lookup::accommodation_prices(conn).await?;
    let rows = generate_bookings(config, &payments, &listings, rng)?;
    insert_rows(conn, &rows).await?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Row bindings
// ---------------------------------------------------------------------------

impl InsertRow for NewAccount {
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static [&'static str] =
        &["email", "first_name", "last_name", "role", "created_at"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.email.clone())
            .push_bind(self.first_name.clone())
            .push_bind(self.last_name.clone())
            .push_bind(self.role.as_str())
            .push_bind(self.created_at);
    }
}

impl InsertRow for NewCredential {
    const TABLE: &'static str = "credentials";
    const COLUMNS: &'static [&'static str] =
        &["account_id", "password_hash", "password_updated_at"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.account_id)
            .push_bind(self.password_hash.clone())
            .push_bind(self.password_updated_at);
    }
}

impl InsertRow for NewAddress {
    const TABLE: &'static str = "addresses";
    const COLUMNS: &'static [&'static str] =
        &["line1", "line2", "city", "postal_code", "country"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.line1.clone())
            .push_bind(self.line2.clone())
            .push_bind(self.city)
            .push_bind(self.postal_code)
            .push_bind(self.country);
    }
}

impl InsertRow for NewAccommodation {
    const TABLE: &'static str = "accommodations";
    const COLUMNS: &'static [&'static str] = &[
        "host_account_id",
        "title",
        "address_id",
        "price_cents",
        "is_active",
        "created_at",
    ];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.host_account_id)
            .push_bind(self.title.clone())
            .push_bind(self.address_id)
            .push_bind(self.price_cents)
            .push_bind(self.is_active)
            .push_bind(self.created_at);
    }
}

impl InsertRow for NewImage {
    const TABLE: &'static str = "images";
    const COLUMNS: &'static [&'static str] = &["mime", "storage_key", "created_at"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.mime)
            .push_bind(self.storage_key.clone())
            .push_bind(self.created_at);
    }
}

impl InsertRow for NewAccommodationImage {
    const TABLE: &'static str = "accommodation_images";
    const COLUMNS: &'static [&'static str] = &[
        "accommodation_id",
        "image_id",
        "sort_order",
        "is_cover",
        "caption",
        "room_tag",
    ];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.accommodation_id)
            .push_bind(self.image_id)
            .push_bind(self.sort_order)
            .push_bind(self.is_cover)
            .push_bind(self.caption)
            .push_bind(self.room_tag);
    }
}

impl InsertRow for NewPaymentMethod {
    const TABLE: &'static str = "payment_methods";
    const COLUMNS: &'static [&'static str] = &["customer_id", "type", "created_at"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.customer_id)
            .push_bind(self.method_type)
            .push_bind(self.created_at);
    }
}

impl InsertRow for NewCreditCard {
    const TABLE: &'static str = "credit_cards";
    const COLUMNS: &'static [&'static str] =
        &["payment_method_id", "brand", "last4", "exp_month", "exp_year"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.payment_method_id)
            .push_bind(self.brand)
            .push_bind(self.last4)
            .push_bind(self.exp_month)
            .push_bind(self.exp_year);
    }
}

impl InsertRow for NewPaypal {
    const TABLE: &'static str = "paypal";
    const COLUMNS: &'static [&'static str] = &["payment_method_id", "paypal_user_id", "email"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.payment_method_id)
            .push_bind(self.paypal_user_id.clone())
            .push_bind(self.email.clone());
    }
}

impl InsertRow for NewReview {
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static [&'static str] = &[
        "accommodation_id",
        "author_account_id",
        "rating",
        "description",
        "created_at",
    ];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.accommodation_id)
            .push_bind(self.author_account_id)
            .push_bind(self.rating)
            .push_bind(self.description.clone())
            .push_bind(self.created_at);
    }
}

impl InsertRow for NewReviewImage {
    const TABLE: &'static str = "review_images";
    const COLUMNS: &'static [&'static str] = &["review_id", "image_id"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.review_id).push_bind(self.image_id);
    }
}

impl InsertRow for NewConversation {
    const TABLE: &'static str = "conversations";
    const COLUMNS: &'static [&'static str] = &["created_at"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.created_at);
    }
}

impl InsertRow for NewMessage {
    const TABLE: &'static str = "messages";
    const COLUMNS: &'static [&'static str] = &[
        "sender_id",
        "receiver_id",
        "conversation_id",
        "body",
        "sent_at",
        "is_read",
    ];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.sender_id)
            .push_bind(self.receiver_id)
            .push_bind(self.conversation_id)
            .push_bind(self.body.clone())
            .push_bind(self.sent_at)
            .push_bind(self.is_read);
    }
}

impl InsertRow for NewNotification {
    const TABLE: &'static str = "notifications";
    const COLUMNS: &'static [&'static str] = &["account_id", "payload", "sent_at"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.account_id)
            .push_bind(self.payload.clone())
            .push_bind(self.sent_at);
    }
}

impl InsertRow for NewPayoutAccount {
    const TABLE: &'static str = "payout_accounts";
    const COLUMNS: &'static [&'static str] = &["host_account_id", "type", "is_default"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.host_account_id)
            .push_bind(self.account_type)
            .push_bind(self.is_default);
    }
}

impl InsertRow for NewPayment {
    const TABLE: &'static str = "payments";
    const COLUMNS: &'static [&'static str] =
        &["customer_id", "amount_cents", "status", "payment_method_id"];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.customer_id)
            .push_bind(self.amount_cents)
            .push_bind(self.status)
            .push_bind(self.payment_method_id);
    }
}

impl InsertRow for NewBooking {
    const TABLE: &'static str = "bookings";
    const COLUMNS: &'static [&'static str] = &[
        "guest_account_id",
        "accommodation_id",
        "start_date",
        "end_date",
        "payment_id",
        "status",
        "created_at",
    ];

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.guest_account_id)
            .push_bind(self.accommodation_id)
            .push_bind(self.start_date)
            .push_bind(self.end_date)
            .push_bind(self.payment_id)
            .push_bind(self.status)
            .push_bind(self.created_at);
    }
}
