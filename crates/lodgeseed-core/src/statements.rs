//! # Statement Repository
//!
//! SQL text for truncation, primary-key discovery, id lookups, table dumps and
//! insert prefixes. Values are always bound as parameters; table and column
//! names that vary at runtime go through `quote_identifier`.

/// Discover the primary-key column(s) of a table. `$1` is the table name.
pub const FETCH_PRIMARY_KEY_COLUMNS: &str = r#"
    SELECT a.attname::text AS column_name
    FROM pg_index i
    JOIN pg_attribute a
      ON a.attrelid = i.indrelid
     AND a.attnum = ANY(i.indkey)
    WHERE i.indrelid = $1::regclass
      AND i.indisprimary
    ORDER BY a.attnum
"#;

/// Public tables, for the connectivity check.
pub const FETCH_PUBLIC_TABLES: &str = r#"
    SELECT table_name::text AS table_name
    FROM information_schema.tables
    WHERE table_schema = 'public'
      AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

pub const FETCH_SERVER_VERSION: &str = "SELECT version()";

/// Ends whatever transaction a SQL file left open.
pub const ROLLBACK: &str = "ROLLBACK";

/// Listing ids with their nightly price.
pub const FETCH_ACCOMMODATION_PRICES: &str = r#"
    SELECT id, price_cents
    FROM accommodations
    ORDER BY id
"#;

/// Each customer's first payment method.
pub const FETCH_FIRST_PAYMENT_METHODS: &str = r#"
    SELECT DISTINCT ON (customer_id) customer_id, id
    FROM payment_methods
    ORDER BY customer_id, id
"#;

/// PayPal payment methods with the owning account's email.
pub const FETCH_PAYPAL_METHOD_EMAILS: &str = r#"
    SELECT pm.id, a.email
    FROM payment_methods pm
    JOIN accounts a ON a.id = pm.customer_id
    WHERE pm.type = 'paypal'
    ORDER BY pm.id
"#;

pub const FETCH_CONVERSATIONS: &str = r#"
    SELECT id, created_at
    FROM conversations
    ORDER BY id
"#;

pub const FETCH_PAYMENTS: &str = r#"
    SELECT id, customer_id, amount_cents, status
    FROM payments
    ORDER BY id
"#;

/// Quote a SQL identifier for PostgreSQL.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Empty a table, restart its identity and cascade to dependents.
pub fn truncate_table(table: &str) -> String {
    format!(
        "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
        quote_identifier(table)
    )
}

/// Every row of a table as one JSON object per row.
pub fn dump_table(table: &str) -> String {
    format!(
        "SELECT row_to_json(t)::text AS row FROM {} AS t",
        quote_identifier(table)
    )
}

/// `INSERT INTO "table" ("a", "b") `; the `VALUES` list is appended by the
/// query builder.
pub fn insert_prefix(table: &str, columns: &[&str]) -> String {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) ",
        quote_identifier(table),
        column_list
    )
}

/// Truncate a SQL string for error messages.
pub fn truncate_sql(sql: &str, max_len: usize) -> String {
    if sql.len() <= max_len {
        return sql.to_string();
    }
    let mut end = max_len;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end])
}
