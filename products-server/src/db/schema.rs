//! Table bootstrap for `products`

use sqlx::PgPool;

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id SERIAL,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
    CONSTRAINT products_pkey PRIMARY KEY (id)
)
"#;

/// Create the products table if it does not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring products table exists");
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    Ok(())
}

/// Delete every product and restart ids at 1.
pub async fn reset_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM products").execute(pool).await?;
    sqlx::query("ALTER SEQUENCE products_id_seq RESTART WITH 1")
        .execute(pool)
        .await?;
    Ok(())
}
