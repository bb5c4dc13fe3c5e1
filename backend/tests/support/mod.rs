#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use petstore::api::{NewPet, Pet};
use petstore::db::PetStoreRepository;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Number of pets inserted by [`seed_pets`].
pub const SEEDED_PETS: usize = 10;

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Insert `testname1..=testname10`, tagged `testtag{i % 5}`.
///
/// On an empty store the pets receive ids 1 through 10 in that order.
pub async fn seed_pets(repo: &dyn PetStoreRepository) -> Vec<Pet> {
    let mut pets = Vec::with_capacity(SEEDED_PETS);
    for i in 1..=SEEDED_PETS {
        let pet = repo
            .create_pet(&NewPet::new(
                format!("testname{}", i),
                Some(format!("testtag{}", i % 5)),
            ))
            .await
            .expect("seeding pets");
        pets.push(pet);
    }
    pets
}

#[cfg(feature = "sqlite-repo")]
pub mod sqlite {
    use std::sync::Arc;

    use petstore::db::{DatabaseConfig, SqliteRepository};
    use tempfile::TempDir;

    /// A SQLite repository backed by a file in a fresh temporary directory.
    ///
    /// Keep the returned `TempDir` alive for as long as the repository is used.
    pub fn temp_repository() -> (TempDir, Arc<SqliteRepository>) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("petstore.db");
        let config = DatabaseConfig::sqlite(path.to_string_lossy().into_owned());
        let repo = SqliteRepository::new(config).expect("open sqlite repository");
        (dir, Arc::new(repo))
    }
}

#[cfg(feature = "http-server")]
pub mod http {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Response status plus decoded JSON body (`Value::Null` when empty).
    pub struct TestResponse {
        pub status: StatusCode,
        pub body: Value,
        pub raw: Vec<u8>,
    }

    pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body")
            .to_vec();
        let body = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&raw).expect("JSON body")
        };
        TestResponse { status, body, raw }
    }

    pub async fn get(router: &Router, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .expect("request");
        send(router, request).await
    }

    pub async fn delete(router: &Router, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        send(router, request).await
    }

    pub async fn post_json(router: &Router, uri: &str, body: &Value) -> TestResponse {
        post_raw(router, uri, body.to_string()).await
    }

    pub async fn post_raw(router: &Router, uri: &str, body: String) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request");
        send(router, request).await
    }

    /// Number of elements in a JSON array body.
    pub fn array_len(body: &Value) -> usize {
        body.as_array().map(Vec::len).expect("array body")
    }
}
