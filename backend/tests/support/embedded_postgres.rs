//! Embedded PostgreSQL provisioning for the Diesel store suites.
//!
//! One cluster is shared per test binary. Every test receives its own
//! database cloned from a template that already carries the migrated schema,
//! so concurrent tests never observe each other's rows.
//!
//! These helpers block; call them from synchronous fixtures, never from
//! inside a Tokio runtime.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use users_backend::outbound::persistence::run_migrations;
use uuid::Uuid;

const TEMPLATE_NAME_PREFIX: &str = "users_template";
const SETUP_RETRIES: usize = 5;
const SETUP_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "users_embedded_test";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_retries<T>(
    label: &str,
    mut attempt_once: impl FnMut() -> Result<T, String>,
) -> Result<T, String> {
    let mut last_error = format!("{label}: no attempts made");
    for attempt in 1..=SETUP_RETRIES {
        match attempt_once() {
            Ok(value) => return Ok(value),
            Err(error) => {
                last_error = format!("{label}: attempt {attempt}/{SETUP_RETRIES}: {error}");
            }
        }
        if attempt < SETUP_RETRIES {
            std::thread::sleep(SETUP_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting the
/// credentials it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the shared cluster spawns any threads, and the
        // shared handle initialises at most once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", STABLE_PASSWORD);
        }
    }
}

/// Start, or reuse, the embedded cluster for this test binary.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    with_retries("start shared cluster", || {
        shared_cluster_handle().map_err(|err| format!("{err:?}"))
    })
}

/// Template name keyed on the migrations directory contents, so editing a
/// migration yields a fresh template.
fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn ensure_template_database(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        runtime
            .block_on(run_migrations(&url))
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(template_name)
}

/// Provision a throwaway database with the current schema. It is dropped
/// when the returned handle goes out of scope.
pub fn provision_database(
    cluster: &ClusterHandle,
    runtime: &Runtime,
) -> Result<TemporaryDatabase, String> {
    with_retries("provision test database", || {
        let template_name = ensure_template_database(cluster, runtime)?;
        let db_name = format!("test_{}", Uuid::new_v4().simple());
        cluster
            .temporary_database_from_template(db_name.as_str(), template_name.as_str())
            .map_err(|err| format!("{err:?}"))
    })
}
