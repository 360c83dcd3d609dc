use rust_embed::RustEmbed;
use sqlx::{Executor, PgPool};
use std::str;

use crate::error::{Error, Result};

#[derive(RustEmbed)]
#[folder = "schema/"]
struct SchemaAssets;

/// Reads the build-order manifest and applies every included SQL file in a
/// single transaction. All statements are `IF NOT EXISTS`, so calling this
/// on every startup is safe.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    let manifest = file_content("00_build_order.sql")
        .ok_or_else(|| Error::Database("Missing 00_build_order.sql".to_string()))?;

    let mut full_script = String::new();

    for line in manifest.lines() {
        let trimmed = line.trim();

        // Parse: -- @include file.sql
        if let Some(path) = parse_include_directive(trimmed) {
            tracing::debug!(file = path, "including schema file");
            let content = file_content(path)
                .ok_or_else(|| Error::Database(format!("Missing included file: {}", path)))?;
            full_script.push_str(&content);
            full_script.push('\n');
        } else if !trimmed.starts_with("--") {
            full_script.push_str(line);
            full_script.push('\n');
        }
    }

    let mut tx = pool.begin().await?;
    (&mut *tx).execute(full_script.as_str()).await?;
    tx.commit().await?;

    tracing::info!("database schema is up to date");
    Ok(())
}

fn file_content(path: &str) -> Option<String> {
    SchemaAssets::get(path)
        .and_then(|f| str::from_utf8(f.data.as_ref()).map(str::to_string).ok())
}

fn parse_include_directive(line: &str) -> Option<&str> {
    if line.starts_with("--") && line.contains("@include") {
        line.split_whitespace().last()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_directives_parse() {
        assert_eq!(
            parse_include_directive("-- @include 01_applicants.sql"),
            Some("01_applicants.sql")
        );
        assert_eq!(parse_include_directive("CREATE TABLE x ();"), None);
        assert_eq!(parse_include_directive("-- plain comment"), None);
    }

    #[test]
    fn embedded_manifest_resolves_every_include() {
        let manifest = file_content("00_build_order.sql").expect("manifest embedded");
        for line in manifest.lines() {
            if let Some(path) = parse_include_directive(line.trim()) {
                assert!(
                    file_content(path).is_some(),
                    "manifest references missing file {}",
                    path
                );
            }
        }
    }
}
