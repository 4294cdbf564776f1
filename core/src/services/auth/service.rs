//! Registration and token exchange orchestration.

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::notification::{confirmation_body, Mailer, CONFIRMATION_SUBJECT};
use crate::services::token::{IssuedToken, TokenService};
use crate::services::verification::CodeIssuer;

use super::identity::{validate_email, validate_username};

/// Result of a signup call
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    /// The user the confirmation code was issued for
    pub user: User,
    /// Whether a new row was created (false for an idempotent resend)
    pub created: bool,
}

/// Authentication service orchestrating registration and token exchange
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for identity persistence
    users: Arc<U>,
    /// Mail transport for confirmation codes
    mailer: Arc<dyn Mailer>,
    /// Stateless confirmation code issuer
    issuer: CodeIssuer,
    /// Token service for minting access tokens
    tokens: Arc<TokenService>,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    pub fn new(
        users: Arc<U>,
        mailer: Arc<dyn Mailer>,
        issuer: CodeIssuer,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            mailer,
            issuer,
            tokens,
        }
    }

    /// Register a user, or re-send a confirmation code to an existing one.
    ///
    /// Presenting the exact `(username, email)` pair of an existing account
    /// is an idempotent resend. A username or email already owned by a
    /// different account is a field-scoped conflict. Two racing first-time
    /// registrations are serialized by the store's unique constraints: the
    /// losing writer receives the same field-scoped conflict.
    pub async fn sign_up(&self, username: &str, email: &str) -> DomainResult<SignupOutcome> {
        validate_username(username).map_err(DomainError::ValidationErr)?;
        validate_email(email).map_err(DomainError::ValidationErr)?;

        let by_username = self.users.find_by_username(username).await?;
        let by_email = self.users.find_by_email(email).await?;

        let (user, created) = match (by_username, by_email) {
            (Some(a), Some(b)) if a.id == b.id => (a, false),
            (Some(_), _) => {
                return Err(DomainError::ValidationErr(ValidationError::DuplicateValue {
                    field: "username".to_string(),
                }));
            }
            (None, Some(_)) => {
                return Err(DomainError::ValidationErr(ValidationError::DuplicateValue {
                    field: "email".to_string(),
                }));
            }
            (None, None) => {
                let user = self.users.create(User::new(username, email)).await?;
                tracing::info!(username = %user.username, "registered new user");
                (user, true)
            }
        };

        let code = self.issuer.issue(&user);
        let body = confirmation_body(&user.username, &code);

        // Delivery is best effort: the HTTP outcome must not depend on the
        // mail transport.
        match self.mailer.send_mail(&user.email, CONFIRMATION_SUBJECT, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    username = %user.username,
                    message_id = %message_id,
                    "confirmation code sent"
                );
            }
            Err(error) => {
                tracing::error!(
                    username = %user.username,
                    error = %error,
                    "failed to deliver confirmation code"
                );
            }
        }

        Ok(SignupOutcome { user, created })
    }

    /// Exchange a `(username, confirmation_code)` pair for an access token.
    ///
    /// A successful exchange advances the user's code epoch, so the code
    /// that was just used stops verifying.
    pub async fn exchange_code(&self, username: &str, code: &str) -> DomainResult<IssuedToken> {
        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !self.issuer.verify(&user, code) {
            tracing::warn!(username = %username, "confirmation code rejected");
            return Err(DomainError::Auth(AuthError::InvalidConfirmationCode));
        }

        user.touch_login();
        let user = self.users.update(user).await?;

        self.tokens.issue(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryUserRepository;
    use crate::services::token::TokenServiceConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mailer that records every message instead of sending it
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        fn last_body(&self) -> Option<String> {
            self.sent.lock().unwrap().last().map(|(_, body)| body.clone())
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_mail(&self, to: &str, _subject: &str, body: &str) -> Result<String, String> {
            if self.fail {
                return Err("provider unavailable".to_string());
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), body.to_string()));
            Ok("msg-1".to_string())
        }

        fn provider_name(&self) -> &str {
            "recording"
        }
    }

    struct Fixture {
        users: Arc<MemoryUserRepository>,
        mailer: Arc<RecordingMailer>,
        service: AuthService<MemoryUserRepository>,
        issuer: CodeIssuer,
    }

    fn fixture() -> Fixture {
        fixture_with_mailer(RecordingMailer::default())
    }

    fn fixture_with_mailer(mailer: RecordingMailer) -> Fixture {
        let users = Arc::new(MemoryUserRepository::new());
        let mailer = Arc::new(mailer);
        let issuer = CodeIssuer::new("auth-test-secret");
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));
        let service = AuthService::new(
            users.clone(),
            mailer.clone(),
            issuer.clone(),
            tokens,
        );
        Fixture {
            users,
            mailer,
            service,
            issuer,
        }
    }

    #[tokio::test]
    async fn test_signup_creates_user_and_sends_code() {
        let f = fixture();
        let outcome = f.service.sign_up("alice", "a@x.com").await.unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.user.username, "alice");
        assert_eq!(f.users.count().await, 1);
        assert_eq!(f.mailer.sent_count(), 1);

        let code = f.issuer.issue(&outcome.user);
        assert!(f.mailer.last_body().unwrap().contains(&code));
    }

    #[tokio::test]
    async fn test_signup_is_idempotent_for_exact_pair() {
        let f = fixture();
        f.service.sign_up("alice", "a@x.com").await.unwrap();
        let second = f.service.sign_up("alice", "a@x.com").await.unwrap();

        assert!(!second.created);
        assert_eq!(f.users.count().await, 1);
        // Each successful call sends exactly one message
        assert_eq!(f.mailer.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_username() {
        let f = fixture();
        f.service.sign_up("alice", "a@x.com").await.unwrap();

        let err = f.service.sign_up("alice", "b@y.com").await.unwrap_err();
        match err {
            DomainError::ValidationErr(ValidationError::DuplicateValue { field }) => {
                assert_eq!(field, "username");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.users.count().await, 1);
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_email() {
        let f = fixture();
        f.service.sign_up("alice", "a@x.com").await.unwrap();

        let err = f.service.sign_up("bob", "a@x.com").await.unwrap_err();
        match err {
            DomainError::ValidationErr(ValidationError::DuplicateValue { field }) => {
                assert_eq!(field, "email");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signup_rejects_reserved_username() {
        let f = fixture();
        for name in ["me", "Me", "ME"] {
            let err = f.service.sign_up(name, "me@x.com").await.unwrap_err();
            assert!(
                matches!(
                    err,
                    DomainError::ValidationErr(ValidationError::ReservedValue { .. })
                ),
                "{name} must be rejected"
            );
        }
        assert_eq!(f.users.count().await, 0);
    }

    #[tokio::test]
    async fn test_signup_rejects_malformed_input() {
        let f = fixture();
        assert!(f.service.sign_up("bad name", "a@x.com").await.is_err());
        assert!(f.service.sign_up("alice", "not-an-email").await.is_err());
        assert!(f.service.sign_up("alice", "").await.is_err());
    }

    #[tokio::test]
    async fn test_mail_failure_does_not_fail_signup() {
        let f = fixture_with_mailer(RecordingMailer::failing());
        let outcome = f.service.sign_up("alice", "a@x.com").await.unwrap();
        assert!(outcome.created);
        assert_eq!(f.users.count().await, 1);
    }

    #[tokio::test]
    async fn test_exchange_succeeds_once_then_rejects_reuse() {
        let f = fixture();
        let outcome = f.service.sign_up("alice", "a@x.com").await.unwrap();
        let code = f.issuer.issue(&outcome.user);

        let issued = f.service.exchange_code("alice", &code).await.unwrap();
        assert!(!issued.token.is_empty());

        // The epoch moved, so the same code no longer verifies
        let err = f.service.exchange_code("alice", &code).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InvalidConfirmationCode)
        ));
    }

    #[tokio::test]
    async fn test_resent_code_works_after_previous_exchange() {
        let f = fixture();
        let outcome = f.service.sign_up("alice", "a@x.com").await.unwrap();
        let first = f.issuer.issue(&outcome.user);
        f.service.exchange_code("alice", &first).await.unwrap();

        // Idempotent resend derives a code for the advanced epoch
        let resent = f.service.sign_up("alice", "a@x.com").await.unwrap();
        let second = f.issuer.issue(&resent.user);
        assert_ne!(first, second);
        assert!(f.service.exchange_code("alice", &second).await.is_ok());
    }

    #[tokio::test]
    async fn test_exchange_unknown_user_is_not_found() {
        let f = fixture();
        let err = f.service.exchange_code("ghost", "whatever").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_exchange_wrong_code_is_rejected() {
        let f = fixture();
        f.service.sign_up("alice", "a@x.com").await.unwrap();
        let err = f
            .service
            .exchange_code("alice", "00000000000000000000000000000000")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InvalidConfirmationCode)
        ));
    }
}
