use crate::config;
use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

/// One roster line as exported by the hospital HR system
#[derive(Debug, Deserialize, PartialEq)]
pub struct RosterEntry {
    pub access_code: String,
    pub display_name: String,
    pub department: String,
}

pub async fn run_migrations(db_pool: &sqlx::SqlitePool, file_name: &str) -> anyhow::Result<()> {
    let mut tera = tera::Tera::new("../migrations/**/*.sql")?;
    tera.autoescape_on(vec![".sql"]);

    let create_tables_query = tera.render(file_name, &tera::Context::new())?;

    sqlx::raw_sql(&create_tables_query).execute(db_pool).await?;
    Ok(())
}

pub fn read_roster_file(file_name: &str) -> anyhow::Result<Vec<RosterEntry>> {
    let content = std::fs::read_to_string(file_name)
        .with_context(|| format!("failed to read roster file {file_name}"))?;

    parse_roster(&content)
}

/// Parses roster entries, rejecting blank access codes.
pub fn parse_roster(content: &str) -> anyhow::Result<Vec<RosterEntry>> {
    let entries: Vec<RosterEntry> =
        serde_json::from_str(content).context("roster file is not a JSON array of entries")?;

    if let Some(position) = entries
        .iter()
        .position(|entry| entry.access_code.trim().is_empty())
    {
        anyhow::bail!("roster entry #{position} has an empty access_code");
    }

    Ok(entries)
}

/// Upserts roster entries by access code (case-insensitive).
///
/// Identity columns are never written, so existing LINE bindings survive an
/// import. Returns `(updated, inserted)`.
pub async fn import_roster(
    db_pool: &SqlitePool,
    entries: &[RosterEntry],
) -> anyhow::Result<(u64, u64)> {
    let mut transaction = db_pool.begin().await?;
    let (mut updated, mut inserted) = (0, 0);

    for entry in entries {
        let now = Utc::now();
        let access_code = entry.access_code.trim();

        let rows = sqlx::query(
            "UPDATE staff SET display_name=$2, department=$3, updated_at=$4 WHERE lower(access_code)=lower($1);",
        )
        .bind(access_code)
        .bind(&entry.display_name)
        .bind(&entry.department)
        .bind(now)
        .execute(&mut *transaction)
        .await?
        .rows_affected();

        if rows > 0 {
            updated += rows;
            continue;
        }

        sqlx::query(
            "INSERT INTO staff(access_code,display_name,department,created_at,updated_at) VALUES($1,$2,$3,$4,$4);",
        )
        .bind(access_code)
        .bind(&entry.display_name)
        .bind(&entry.department)
        .bind(now)
        .execute(&mut *transaction)
        .await?;
        inserted += 1;
    }

    transaction.commit().await?;
    Ok((updated, inserted))
}

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    if encrypted {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
                .pragma("key", &config::APP_CONFIG.db_pass_encrypt)
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Row, sqlite::SqlitePoolOptions};

    const CREATE_TABLES: &str = include_str!("../../migrations/create_tables.sql");

    async fn setup_pool() -> SqlitePool {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::raw_sql(CREATE_TABLES).execute(&db_pool).await.unwrap();
        db_pool
    }

    fn entry(code: &str, name: &str, department: &str) -> RosterEntry {
        RosterEntry {
            access_code: code.into(),
            display_name: name.into(),
            department: department.into(),
        }
    }

    #[test]
    fn test_parse_roster() {
        let entries = parse_roster(
            r#"[{"access_code":"D123","display_name":"Somchai","department":"Cardiology"}]"#,
        )
        .unwrap();

        assert_eq!(entries, vec![entry("D123", "Somchai", "Cardiology")]);
    }

    #[test]
    fn test_parse_roster_rejects_blank_code() {
        let result = parse_roster(
            r#"[{"access_code":"  ","display_name":"Somchai","department":"Cardiology"}]"#,
        );

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_import_roster_upserts_by_access_code() {
        let db_pool = setup_pool().await;

        let first = import_roster(&db_pool, &[entry("D123", "Somchai", "Cardiology")])
            .await
            .unwrap();
        sqlx::query("UPDATE staff SET bound_identity='U1'")
            .execute(&db_pool)
            .await
            .unwrap();
        let second = import_roster(
            &db_pool,
            &[
                entry("d123", "Somchai J.", "Cardiology"),
                entry("D200", "Malee", "Pediatrics"),
            ],
        )
        .await
        .unwrap();

        assert_eq!(first, (0, 1));
        assert_eq!(second, (1, 1));

        let row = sqlx::query("SELECT display_name, bound_identity FROM staff WHERE access_code='D123'")
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>("display_name"), "Somchai J.");
        assert_eq!(row.get::<Option<String>, _>("bound_identity").as_deref(), Some("U1"));
    }
}
