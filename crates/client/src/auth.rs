use std::sync::{Arc, PoisonError, RwLock};

use api_types::auth::{AuthResponse, LoginRequest, RegisterRequest};
use reqwest::StatusCode;
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::error::StoreError;
use crate::session::Session;

/// Published authentication state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub user_id: Option<String>,
    pub is_authenticated: bool,
}

/// Logs in and registers against `/api/auth`, writing the bearer token
/// into the injected [`Session`] on success. The auth endpoints are the
/// only calls issued without a token.
#[derive(Clone, Debug)]
pub struct AuthStore {
    api: ApiClient,
    session: Session,
    state: Arc<RwLock<AuthState>>,
    gate: Arc<Mutex<()>>,
}

impl AuthStore {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            state: Arc::new(RwLock::new(AuthState::default())),
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn login(&self, email: &str, password: &str) {
        let _gate = self.gate.lock().await;
        self.publish_loading();
        match self.request_login(email, password).await {
            Ok(auth) => self.publish_authenticated(auth),
            Err(err) => self.publish_failure(err.to_string()),
        }
    }

    /// Registers a new user and, on success, immediately signs in with
    /// the same credentials. A successful registration followed by a
    /// failed sign-in publishes a distinct error and leaves the session
    /// unauthenticated.
    pub async fn register(&self, name: &str, email: &str, password: &str) {
        let _gate = self.gate.lock().await;
        self.publish_loading();

        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        match self
            .api
            .post_json::<_, AuthResponse>(None, "/api/auth/register", &body)
            .await
        {
            Ok(_) => match self.request_login(email, password).await {
                Ok(auth) => self.publish_authenticated(auth),
                Err(err) => {
                    self.publish_failure(format!("registered, but sign-in failed: {err}"));
                }
            },
            Err(err) => self.publish_failure(err.to_string()),
        }
    }

    /// Clears the session token and resets the auth state. Local only,
    /// no network call.
    pub fn logout(&self) {
        self.session.clear_token();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = AuthState::default();
    }

    async fn request_login(&self, email: &str, password: &str) -> Result<AuthResponse, StoreError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self
            .api
            .post_json::<_, AuthResponse>(None, "/api/auth/login", &body)
            .await?
        {
            Some(auth) => Ok(auth),
            None => Err(StoreError::Server {
                status: StatusCode::NO_CONTENT,
                message: "empty authentication response".to_string(),
            }),
        }
    }

    fn publish_loading(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.is_loading = true;
        state.error_message = None;
    }

    fn publish_authenticated(&self, auth: AuthResponse) {
        self.session.set_token(auth.token);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = AuthState {
            is_loading: false,
            error_message: None,
            user_id: Some(auth.user_id),
            is_authenticated: true,
        };
    }

    fn publish_failure(&self, message: String) {
        tracing::warn!(error = %message, "authentication failed");
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.is_loading = false;
        state.error_message = Some(message);
        state.is_authenticated = false;
    }
}
