//! Navigation side effect of a 401.

use std::sync::RwLock;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// Sends the user to the login view after the session was dropped.
pub trait AuthRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

/// Tracks the current view path and moves it to `/login` on redirect.
#[derive(Debug)]
pub struct ViewRedirect {
    current: RwLock<String>,
}

impl Default for ViewRedirect {
    fn default() -> Self {
        Self::new("/")
    }
}

impl ViewRedirect {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(current.into()),
        }
    }

    pub fn navigate(&self, path: impl Into<String>) {
        if let Ok(mut current) = self.current.write() {
            *current = path.into();
        }
    }

    pub fn current(&self) -> String {
        self.current
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl AuthRedirect for ViewRedirect {
    fn redirect_to_login(&self) {
        let Ok(mut current) = self.current.write() else {
            return;
        };
        if *current == LOGIN_PATH {
            return;
        }
        tracing::info!(from = %current, "redirecting to login");
        *current = LOGIN_PATH.to_string();
    }
}

/// Redirect hook that does nothing; for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedirect;

impl AuthRedirect for NoRedirect {
    fn redirect_to_login(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirects_to_login() {
        let view = ViewRedirect::new("/product/3");
        view.redirect_to_login();
        assert_eq!(view.current(), LOGIN_PATH);
    }

    #[test]
    fn test_already_on_login_stays() {
        let view = ViewRedirect::new(LOGIN_PATH);
        view.redirect_to_login();
        assert_eq!(view.current(), LOGIN_PATH);

        view.navigate("/offers");
        assert_eq!(view.current(), "/offers");
    }
}
