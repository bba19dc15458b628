//! Throwaway PostgreSQL databases for adapter tests.
//!
//! `DEENIFY_TEST_DATABASE_URL` points the suite at an existing server. Without
//! it an embedded cluster is bootstrapped with `pg-embed-setup-unpriv`, using
//! data directories under the target directory so sandboxed runs can write
//! them. Each caller gets a freshly created database.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

/// Connection URL of an externally managed server's maintenance database.
pub const DATABASE_URL_ENV: &str = "DEENIFY_TEST_DATABASE_URL";

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// A database created for one test context.
///
/// Holding the value keeps the embedded cluster, if any, alive.
pub struct TestDatabase {
    url: String,
    _cluster: Option<TestCluster>,
}

impl TestDatabase {
    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn create_unique_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = pg_embed_target_dir().join(format!(
        "bootstrap-{}-{}",
        std::process::id(),
        Uuid::new_v4()
    ));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn is_transient_error(err: &str) -> bool {
    let lower = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| lower.contains(pattern))
}

/// Bootstrap an embedded cluster, retrying transient download failures.
fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap_guard = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env_guard = if needs_override {
        let (runtime_dir, data_dir) = create_unique_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            (
                "PG_RUNTIME_DIR",
                Some(runtime_dir.to_string_lossy().into_owned()),
            ),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient_error(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * (1 << attempt)));
            }
        }
    }
    Err(last_error)
}

/// Replace the database path of a `postgres://` URL.
fn with_database(url: &str, name: &str) -> String {
    let (base, _) = url.rsplit_once('/').unwrap_or((url, ""));
    format!("{base}/{name}")
}

fn create_database(maintenance_url: &str, name: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(maintenance_url).map_err(|err| err.to_string())?;
    diesel::sql_query(format!(r#"CREATE DATABASE "{name}""#))
        .execute(&mut conn)
        .map_err(|err| format!("create database {name}: {err}"))?;
    Ok(())
}

/// Create an empty database on the configured server or an embedded cluster.
pub fn provision_database() -> Result<TestDatabase, String> {
    let name = format!("deenify_test_{}", Uuid::new_v4().simple());
    match std::env::var(DATABASE_URL_ENV) {
        Ok(maintenance_url) => {
            create_database(&maintenance_url, &name)?;
            Ok(TestDatabase {
                url: with_database(&maintenance_url, &name),
                _cluster: None,
            })
        }
        Err(_) => {
            let cluster = test_cluster()?;
            let url = {
                let connection = cluster.connection();
                create_database(&connection.database_url("postgres"), &name)?;
                connection.database_url(&name)
            };
            Ok(TestDatabase {
                url,
                _cluster: Some(cluster),
            })
        }
    }
}
