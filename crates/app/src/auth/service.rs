//! Identity service.

use std::fmt::Write as _;

use async_trait::async_trait;
use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::{
    auth::{
        errors::IdentityServiceError,
        models::{Identity, IssuedSession, Role, UserUuid},
        repository::PgSessionsRepository,
    },
    database::Db,
};

/// Length of generated session tokens.
const TOKEN_LEN: usize = 40;

#[derive(Debug, Clone)]
pub struct PgIdentityService {
    db: Db,
    repository: PgSessionsRepository,
}

impl PgIdentityService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl IdentityService for PgIdentityService {
    async fn authenticate_bearer(&self, token: &str) -> Result<Identity, IdentityServiceError> {
        let mut tx = self.db.begin().await?;

        let identity = self
            .repository
            .get_session(&mut tx, &hash_token(token))
            .await?;

        tx.commit().await?;

        Ok(identity)
    }

    async fn issue_session(
        &self,
        user: UserUuid,
        role: Role,
    ) -> Result<IssuedSession, IdentityServiceError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let mut tx = self.db.begin().await?;

        self.repository
            .create_session(&mut tx, &hash_token(&token), user, role)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user, role = role.as_str(), "issued session token");

        Ok(IssuedSession { token, user, role })
    }
}

#[automock]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve a bearer token to the identity it belongs to.
    async fn authenticate_bearer(&self, token: &str) -> Result<Identity, IdentityServiceError>;

    /// Issue a new opaque session token. The raw token is returned exactly
    /// once; only its hash is stored.
    async fn issue_session(
        &self,
        user: UserUuid,
        role: Role,
    ) -> Result<IssuedSession, IdentityServiceError>;
}

fn hash_token(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        })
}
