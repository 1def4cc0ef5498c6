//! # pk-auth-email
//!
//! Identity resolution for requests that were already authenticated
//! upstream. The upstream authenticator (reverse proxy, gateway, or
//! session layer) verifies credentials and forwards the principal's
//! email; this plugin maps that email to an Account. No credential
//! verification happens here.

use async_trait::async_trait;
use pk_core::error::{AppError, Result};
use pk_core::models::Account;
use pk_core::traits::{AccountRepo, IdentityProvider};
use std::sync::Arc;

pub struct EmailIdentityProvider {
    accounts: Arc<dyn AccountRepo>,
}

impl EmailIdentityProvider {
    pub fn new(accounts: Arc<dyn AccountRepo>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl IdentityProvider for EmailIdentityProvider {
    async fn resolve(&self, principal: &str) -> Result<Account> {
        let email = principal.trim();
        if email.is_empty() {
            return Err(AppError::Forbidden);
        }
        match self.accounts.find_by_email(email).await? {
            Some(account) => Ok(account),
            None => {
                log::debug!("no account for authenticated principal {email:?}");
                Err(AppError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct OneAccountRepo {
        account: Mutex<Option<Account>>,
    }

    #[async_trait]
    impl AccountRepo for OneAccountRepo {
        async fn create(&self, account: Account) -> Result<()> {
            *self.account.lock().unwrap() = Some(account);
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
            Ok(self
                .account
                .lock()
                .unwrap()
                .clone()
                .filter(|a| a.id == id))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
            Ok(self
                .account
                .lock()
                .unwrap()
                .clone()
                .filter(|a| a.email == email))
        }
    }

    #[tokio::test]
    async fn resolves_a_known_email() {
        let repo = Arc::new(OneAccountRepo::default());
        repo.create(Account {
            id: Uuid::now_v7(),
            email: "me@example.com".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

        let provider = EmailIdentityProvider::new(repo);
        let account = provider.resolve(" me@example.com ").await.unwrap();
        assert_eq!(account.email, "me@example.com");
    }

    #[tokio::test]
    async fn unknown_or_empty_principals_are_rejected() {
        let provider = EmailIdentityProvider::new(Arc::new(OneAccountRepo::default()));
        assert!(matches!(
            provider.resolve("ghost@example.com").await.unwrap_err(),
            AppError::Forbidden
        ));
        assert!(matches!(
            provider.resolve("").await.unwrap_err(),
            AppError::Forbidden
        ));
    }
}
