//! Schema bootstrap for the PostgreSQL store

use sqlx::PgPool;

/// Create the lists and todos tables if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running todoctl migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lists (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT false,
            list_id INT NOT NULL REFERENCES lists (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_list_id ON todos (list_id)")
        .execute(pool)
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
