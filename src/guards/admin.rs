//! Admin back-office gate.
//!
//! On mount the guard asks the who-am-i endpoint once and settles into `Allowed` or
//! `Denied`. It never polls or retries. If the guard is unmounted while the request is
//! in flight, the request still completes but its result is dropped.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use url::Url;

use super::{GuardScreen, HOME};
use crate::api::v1::dto::me::MeResponse;
use crate::error::ErrorResponse;
use crate::services::auth::Principal;

pub const ADMIN_ME_PATH: &str = "/api/admin/me";

/// Shown when the endpoint could not be reached at all.
pub const UNAVAILABLE_MESSAGE: &str =
    "Unable to verify admin access right now. Please refresh the page to try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoAmIError {
    /// Non-success response; `message` is the server's `error` field.
    Denied { status: u16, message: String },
    /// No usable response (connection failure, unreadable body).
    Unavailable(String),
}

impl fmt::Display for WhoAmIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied { status, message } => write!(f, "denied ({status}): {message}"),
            Self::Unavailable(reason) => write!(f, "who-am-i unavailable: {reason}"),
        }
    }
}

impl std::error::Error for WhoAmIError {}

#[async_trait]
pub trait WhoAmI: Send + Sync {
    async fn who_am_i(&self) -> Result<Principal, WhoAmIError>;
}

/// `GET {base}/api/admin/me` over HTTP.
pub struct HttpWhoAmI {
    client: reqwest::Client,
    endpoint: Url,
    bearer: Option<String>,
}

impl fmt::Debug for HttpWhoAmI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the credential
        f.debug_struct("HttpWhoAmI")
            .field("endpoint", &self.endpoint.as_str())
            .field("bearer", &self.bearer.is_some())
            .finish()
    }
}

impl HttpWhoAmI {
    /// `bearer` is sent as `Authorization: Bearer ...`; browsers send the cookie instead.
    pub fn new(base_url: &Url, bearer: Option<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: base_url.join(ADMIN_ME_PATH)?,
            bearer,
        })
    }
}

#[async_trait]
impl WhoAmI for HttpWhoAmI {
    async fn who_am_i(&self) -> Result<Principal, WhoAmIError> {
        let mut req = self.client.get(self.endpoint.clone());
        if let Some(token) = &self.bearer {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| WhoAmIError::Unavailable(e.to_string()))?;
        let status = resp.status();

        if status.is_success() {
            let body: MeResponse = resp
                .json()
                .await
                .map_err(|e| WhoAmIError::Unavailable(e.to_string()))?;
            return Ok(body.user);
        }

        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("request failed with status {status}"),
        };

        Err(WhoAmIError::Denied {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminGuardState {
    Loading,
    Allowed(Principal),
    Denied { message: String },
}

impl AdminGuardState {
    fn from_result(result: Result<Principal, WhoAmIError>) -> Self {
        match result {
            Ok(principal) => Self::Allowed(principal),
            Err(WhoAmIError::Denied { message, .. }) => Self::Denied { message },
            Err(WhoAmIError::Unavailable(_)) => Self::Denied {
                message: UNAVAILABLE_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Allowed(p) => Some(p),
            _ => None,
        }
    }

    pub fn screen(&self) -> Option<GuardScreen> {
        match self {
            Self::Denied { message } => Some(GuardScreen {
                title: "Access denied",
                message: message.clone(),
                action: HOME,
            }),
            Self::Loading | Self::Allowed(_) => None,
        }
    }
}

/// One mounted admin guard. Must be created inside a tokio runtime.
pub struct AdminGuard {
    state: watch::Receiver<AdminGuardState>,
    aborted: Arc<AtomicBool>,
}

impl AdminGuard {
    pub fn mount(client: Arc<dyn WhoAmI>) -> Self {
        let (tx, rx) = watch::channel(AdminGuardState::Loading);
        let aborted = Arc::new(AtomicBool::new(false));
        let flag = aborted.clone();

        tokio::spawn(async move {
            let result = client.who_am_i().await;

            if flag.load(Ordering::Acquire) {
                tracing::debug!("admin guard unmounted; dropping who-am-i result");
                return;
            }
            if let Err(e) = &result {
                tracing::info!(error = %e, "admin access denied");
            }
            // Receiver gone means nobody is looking any more.
            tx.send(AdminGuardState::from_result(result)).ok();
        });

        Self { state: rx, aborted }
    }

    pub fn state(&self) -> AdminGuardState {
        self.state.borrow().clone()
    }

    /// Waits for the single transition. Returns the current (loading) state if the
    /// guard was unmounted before the request finished.
    pub async fn resolved(&mut self) -> AdminGuardState {
        let resolved = match self.state.wait_for(AdminGuardState::is_resolved).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        resolved.unwrap_or_else(|| self.state())
    }

    pub fn unmount(&self) {
        self.aborted.store(true, Ordering::Release);
    }
}

impl Drop for AdminGuard {
    fn drop(&mut self) {
        self.unmount();
    }
}
