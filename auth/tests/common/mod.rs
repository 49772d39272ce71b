#![allow(dead_code)]

use std::sync::Once;

use async_trait::async_trait;
use chrono::TimeZone;
use chrono::Utc;
use mockall::mock;
use switchcraft_auth::Account;
use switchcraft_auth::CredentialLookup;
use switchcraft_auth::HashParameters;
use switchcraft_auth::PasswordHasher;
use uuid::Uuid;

mock! {
    pub Lookup {}

    #[async_trait]
    impl CredentialLookup for Lookup {
        async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Account>>;
    }
}

static TRACING: Once = Once::new();

/// Install a test subscriber once; set RUST_LOG to see output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "switchcraft_auth=debug".into()),
            )
            .with_test_writer()
            .init();
    });
}

pub const ZERO_KEY: [u8; 64] = [0u8; 64];
pub const ONE_KEY: [u8; 64] = [1u8; 64];

/// Parameters cheap enough for tests.
pub fn cheap_params() -> HashParameters {
    HashParameters {
        memory_cost_kib: 64,
        iterations: 1,
        parallelism: 1,
        salt_length: 16,
        key_length: 32,
    }
}

pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_params(cheap_params()).expect("Failed to build hasher")
}

pub fn test_account(username: &str) -> Account {
    Account {
        id: 42,
        uuid: Uuid::new_v4(),
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
        email: format!("{username}@example.com"),
        username: username.to_string(),
        created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        created_by: 1,
        modified: Some(Utc.with_ymd_and_hms(2024, 4, 2, 8, 30, 15).unwrap()),
        modified_by: Some(1),
        password: None,
    }
}
