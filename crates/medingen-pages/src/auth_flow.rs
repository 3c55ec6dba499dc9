//! Login and registration form.

use medingen_auth::{AuthError, Credentials, UserSession};
use medingen_gateway::{ApiError, Gateway, AUTH_FAILED};

use crate::PageError;

/// Shortest password accepted when registering.
pub const MIN_REGISTER_PASSWORD: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login to Medingen",
            AuthMode::Register => "Create Account",
        }
    }
}

/// State of the login/registration form.
///
/// A successful submit stores the issued session; the gateway only reads it.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    gateway: Gateway,
    mode: AuthMode,
    form: Credentials,
    error: Option<String>,
    loading: bool,
}

impl AuthFlow {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            mode: AuthMode::Login,
            form: Credentials::default(),
            error: None,
            loading: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn form(&self) -> &Credentials {
        &self.form
    }

    /// Message from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switch between login and registration. The form is cleared.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.reset();
    }

    pub fn reset(&mut self) {
        self.form = Credentials::default();
        self.error = None;
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
        self.error = None;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.error = None;
    }

    fn validate(&self) -> Result<(), AuthError> {
        self.form.validate()?;
        let too_short = self.form.password.chars().count() < MIN_REGISTER_PASSWORD;
        if self.mode == AuthMode::Register && too_short {
            return Err(AuthError::InvalidCredentials(format!(
                "password must be at least {} characters long",
                MIN_REGISTER_PASSWORD
            )));
        }
        Ok(())
    }

    /// Submit the form in the current mode and persist the issued session.
    pub async fn submit(&mut self) -> Result<UserSession, PageError> {
        self.loading = true;
        self.error = None;
        let outcome = self.authenticate().await;
        self.loading = false;

        match outcome {
            Ok(session) => {
                tracing::info!(mode = ?self.mode, user = session.display_name(), "signed in");
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(mode = ?self.mode, error = %e, "auth error");
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    AUTH_FAILED.to_string()
                } else {
                    message
                });
                Err(PageError::Api(e))
            }
        }
    }

    async fn authenticate(&self) -> Result<UserSession, ApiError> {
        self.validate()?;
        let payload = match self.mode {
            AuthMode::Login => self.gateway.login(&self.form).await?,
            AuthMode::Register => self.gateway.register(&self.form).await?,
        };
        let session = payload.into_inner().into_session()?;
        self.gateway.session().set(&session)?;
        Ok(session)
    }

    /// Drop the stored session.
    pub fn logout(&mut self) -> Result<(), PageError> {
        self.gateway.session().clear().map_err(ApiError::from)?;
        self.reset();
        tracing::info!("signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }
}
