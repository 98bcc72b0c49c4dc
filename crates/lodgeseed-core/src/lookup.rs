//! # ID Lookups
//!
//! Read back identifiers already committed to parent tables so dependent
//! generators only ever reference rows that exist. Nothing is cached: every
//! call goes to the database, inside the run's transaction.

use chrono::NaiveDateTime;
use sqlx::PgConnection;

use crate::error::{Result, SeedError};
use crate::statements::{self, quote_identifier, truncate_sql};

/// Optional predicate narrowing which ids a lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFilter<'a> {
    /// `WHERE "column" = $1`, with `value` bound as text.
    Eq { column: &'a str, value: &'a str },
    /// Ids not referenced by `table.column`.
    NotReferencedBy { table: &'a str, column: &'a str },
}

impl<'a> IdFilter<'a> {
    pub fn eq(column: &'a str, value: &'a str) -> Self {
        IdFilter::Eq { column, value }
    }

    pub fn not_referenced_by(table: &'a str, column: &'a str) -> Self {
        IdFilter::NotReferencedBy { table, column }
    }

    fn where_clause(&self, pk_column: &str) -> String {
        match self {
            IdFilter::Eq { column, .. } => format!("WHERE {} = $1", quote_identifier(column)),
            IdFilter::NotReferencedBy { table, column } => format!(
                "WHERE {pk} NOT IN (SELECT {col} FROM {tbl} WHERE {col} IS NOT NULL)",
                pk = quote_identifier(pk_column),
                col = quote_identifier(column),
                tbl = quote_identifier(table),
            ),
        }
    }
}

/// A listing and its nightly price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedListing {
    pub id: i64,
    pub price_cents: i32,
}

/// A customer together with their first payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerMethod {
    pub customer_id: i64,
    pub payment_method_id: i64,
}

/// A PayPal payment method and the email of the account that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEmail {
    pub payment_method_id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationRef {
    pub id: i64,
    pub created_at: NaiveDateTime,
}

/// The parts of a committed payment a booking is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRef {
    pub id: i64,
    pub customer_id: i64,
    pub amount_cents: i64,
    pub status: String,
}

/// Name of the single primary-key column of `table`.
pub async fn primary_key_column(conn: &mut PgConnection, table: &str) -> Result<String> {
    let columns: Vec<(String,)> = sqlx::query_as(statements::FETCH_PRIMARY_KEY_COLUMNS)
        .bind(table)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            statement_error(
                table,
                "primary key lookup failed",
                statements::FETCH_PRIMARY_KEY_COLUMNS,
                e,
            )
        })?;

    match columns.as_slice() {
        [(column,)] => Ok(column.clone()),
        other => Err(SeedError::PrimaryKey {
            table: table.to_string(),
            found: other.len(),
        }),
    }
}

/// Build the id lookup statement for a table whose key column is known.
pub fn fetch_ids_sql(table: &str, pk_column: &str, filter: Option<&IdFilter<'_>>) -> String {
    let pk = quote_identifier(pk_column);
    let where_clause = filter
        .map(|f| format!(" {}", f.where_clause(pk_column)))
        .unwrap_or_default();
    format!(
        "SELECT {pk} FROM {tbl}{where_clause} ORDER BY {pk}",
        tbl = quote_identifier(table),
    )
}

/// Existing primary-key values of `table`, ascending, optionally filtered.
pub async fn fetch_ids(
    conn: &mut PgConnection,
    table: &str,
    filter: Option<IdFilter<'_>>,
) -> Result<Vec<i64>> {
    let pk_column = primary_key_column(conn, table).await?;
    let sql = fetch_ids_sql(table, &pk_column, filter.as_ref());

    let mut query = sqlx::query_as::<_, (i64,)>(&sql);
    if let Some(IdFilter::Eq { value, .. }) = filter {
        query = query.bind(value);
    }

    let ids = query
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| statement_error(table, "id lookup failed", &sql, e))?;

    Ok(ids.into_iter().map(|(id,)| id).collect())
}

/// Account ids with the given role.
pub async fn account_ids_with_role(conn: &mut PgConnection, role: &str) -> Result<Vec<i64>> {
    fetch_ids(conn, "accounts", Some(IdFilter::eq("role", role))).await
}

pub async fn accommodation_prices(conn: &mut PgConnection) -> Result<Vec<PricedListing>> {
    let rows: Vec<(i64, i32)> = sqlx::query_as(statements::FETCH_ACCOMMODATION_PRICES)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            statement_error(
                "accommodations",
                "price lookup failed",
                statements::FETCH_ACCOMMODATION_PRICES,
                e,
            )
        })?;

    Ok(rows
        .into_iter()
        .map(|(id, price_cents)| PricedListing { id, price_cents })
        .collect())
}

pub async fn first_payment_methods(conn: &mut PgConnection) -> Result<Vec<CustomerMethod>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(statements::FETCH_FIRST_PAYMENT_METHODS)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            statement_error(
                "payment_methods",
                "first method lookup failed",
                statements::FETCH_FIRST_PAYMENT_METHODS,
                e,
            )
        })?;

    Ok(rows
        .into_iter()
        .map(|(customer_id, payment_method_id)| CustomerMethod {
            customer_id,
            payment_method_id,
        })
        .collect())
}

pub async fn paypal_method_emails(conn: &mut PgConnection) -> Result<Vec<MethodEmail>> {
    let rows: Vec<(i64, String)> = sqlx::query_as(statements::FETCH_PAYPAL_METHOD_EMAILS)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            statement_error(
                "payment_methods",
                "paypal email lookup failed",
                statements::FETCH_PAYPAL_METHOD_EMAILS,
                e,
            )
        })?;

    Ok(rows
        .into_iter()
        .map(|(payment_method_id, email)| MethodEmail {
            payment_method_id,
            email,
        })
        .collect())
}

pub async fn conversations(conn: &mut PgConnection) -> Result<Vec<ConversationRef>> {
    let rows: Vec<(i64, NaiveDateTime)> = sqlx::query_as(statements::FETCH_CONVERSATIONS)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            statement_error(
                "conversations",
                "conversation lookup failed",
                statements::FETCH_CONVERSATIONS,
                e,
            )
        })?;

    Ok(rows
        .into_iter()
        .map(|(id, created_at)| ConversationRef { id, created_at })
        .collect())
}

pub async fn payments(conn: &mut PgConnection) -> Result<Vec<PaymentRef>> {
    let rows: Vec<(i64, i64, i64, String)> = sqlx::query_as(statements::FETCH_PAYMENTS)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            statement_error(
                "payments",
                "payment lookup failed",
                statements::FETCH_PAYMENTS,
                e,
            )
        })?;

    Ok(rows
        .into_iter()
        .map(|(id, customer_id, amount_cents, status)| PaymentRef {
            id,
            customer_id,
            amount_cents,
            status,
        })
        .collect())
}

pub(crate) fn statement_error(
    table: &str,
    message: &str,
    sql: &str,
    source: sqlx::Error,
) -> SeedError {
    SeedError::Statement {
        table: table.to_string(),
        message: message.to_string(),
        sql_preview: truncate_sql(sql.trim(), 200),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_ids_sql_unfiltered() {
        assert_eq!(
            fetch_ids_sql("accounts", "id", None),
            "SELECT \"id\" FROM \"accounts\" ORDER BY \"id\""
        );
    }

    #[test]
    fn test_fetch_ids_sql_eq_filter_binds_value() {
        let sql = fetch_ids_sql("accounts", "id", Some(&IdFilter::eq("role", "host")));
        assert_eq!(
            sql,
            "SELECT \"id\" FROM \"accounts\" WHERE \"role\" = $1 ORDER BY \"id\""
        );
        assert!(!sql.contains("host"));
    }

    #[test]
    fn test_fetch_ids_sql_not_referenced() {
        let sql = fetch_ids_sql(
            "images",
            "id",
            Some(&IdFilter::not_referenced_by("review_images", "image_id")),
        );
        assert_eq!(
            sql,
            "SELECT \"id\" FROM \"images\" WHERE \"id\" NOT IN \
             (SELECT \"image_id\" FROM \"review_images\" WHERE \"image_id\" IS NOT NULL) \
             ORDER BY \"id\""
        );
    }
}
