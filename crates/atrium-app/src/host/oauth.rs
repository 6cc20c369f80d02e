//! Google sign-in via the system browser.
//!
//! PKCE authorization-code flow with a loopback redirect: a short-lived
//! axum server on `127.0.0.1` receives the code, and the token request is
//! described back to content rather than performed here.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use atrium_bridge::{HostError, OauthExchange, RequestInit};
use atrium_common::PlatformError;
use atrium_config::schema::OauthConfig;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64URL;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

const CALLBACK_PATH: &str = "/callback";

const SUCCESS_PAGE: &str = "<!doctype html><title>Atrium</title>\
<p>Signed in. You can close this tab and return to Atrium.</p>";

const FAILURE_PAGE: &str = "<!doctype html><title>Atrium</title>\
<p>Sign-in was not completed. Return to Atrium and try again.</p>";

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    pub fn generate() -> Self {
        Self::from_verifier(random_token(32))
    }

    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = B64URL.encode(Sha256::digest(verifier.as_bytes()));
        Self { verifier, challenge }
    }
}

/// `len` random bytes, base64url without padding.
pub fn random_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    B64URL.encode(bytes)
}

pub fn authorization_url(config: &OauthConfig, redirect_uri: &str, pkce: &Pkce, state: &str) -> String {
    let scope = config.scopes.join(" ");
    let params = [
        ("client_id", config.google_client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", scope.as_str()),
        ("code_challenge", pkce.challenge.as_str()),
        ("code_challenge_method", "S256"),
        ("state", state),
        ("access_type", "offline"),
        ("prompt", "consent"),
    ];
    format!("{}?{}", config.auth_endpoint, form_encode(&params))
}

/// The token request content should send to redeem `code`.
pub fn token_exchange(config: &OauthConfig, code: &str, verifier: &str, redirect_uri: &str) -> OauthExchange {
    let body = form_encode(&[
        ("code", code),
        ("client_id", config.google_client_id.as_str()),
        ("code_verifier", verifier),
        ("grant_type", "authorization_code"),
        ("redirect_uri", redirect_uri),
    ]);
    OauthExchange {
        url: config.token_endpoint.clone(),
        request_init: RequestInit {
            method: "POST".into(),
            headers: BTreeMap::from([(
                "content-type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )]),
            body,
        },
    }
}

/// Run the consent flow: open the consent page with `open_browser`, wait
/// for the redirect and return the token exchange.
pub async fn run_consent_flow<F>(config: &OauthConfig, open_browser: F) -> Result<OauthExchange, HostError>
where
    F: FnOnce(&str) -> Result<(), PlatformError>,
{
    if config.google_client_id.trim().is_empty() {
        return Err(HostError::Rejected(
            "google sign-in is not configured (oauth.google_client_id)".into(),
        ));
    }

    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let port = listener.local_addr()?.port();
    let redirect_uri = format!("http://127.0.0.1:{port}{CALLBACK_PATH}");
    let pkce = Pkce::generate();
    let state = random_token(16);

    let (result_tx, result_rx) = oneshot::channel();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let callback = CallbackState {
        expected_state: state.clone().into(),
        result: Arc::new(Mutex::new(Some(result_tx))),
    };
    let router = Router::new()
        .route(CALLBACK_PATH, get(callback_handler))
        .with_state(callback);
    tokio::spawn(async move {
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await;
        match served {
            Ok(()) => debug!("sign-in listener stopped"),
            Err(e) => warn!("sign-in listener failed: {e}"),
        }
    });

    open_browser(&authorization_url(config, &redirect_uri, &pkce, &state))?;
    info!(port, "waiting for google sign-in redirect");

    let timeout = Duration::from_secs(config.redirect_timeout_secs);
    let outcome = tokio::time::timeout(timeout, result_rx).await;
    let _ = stop_tx.send(());
    let code = match outcome {
        Ok(Ok(redirect)) => redirect?,
        Ok(Err(_)) => return Err(HostError::Rejected("sign-in listener stopped early".into())),
        Err(_) => return Err(HostError::Rejected("timed out waiting for google sign-in".into())),
    };

    info!("google sign-in code received");
    Ok(token_exchange(config, &code, &pkce.verifier, &redirect_uri))
}

type RedirectSender = oneshot::Sender<Result<String, HostError>>;

#[derive(Clone)]
struct CallbackState {
    expected_state: Arc<str>,
    /// Taken by the first request that reaches the callback route.
    result: Arc<Mutex<Option<RedirectSender>>>,
}

async fn callback_handler(
    State(callback): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Html<&'static str>) {
    let redirect = check_redirect(&params, &callback.expected_state);
    let reply = match &redirect {
        Ok(_) => (StatusCode::OK, Html(SUCCESS_PAGE)),
        Err(_) => (StatusCode::BAD_REQUEST, Html(FAILURE_PAGE)),
    };

    let sender = callback.result.lock().ok().and_then(|mut slot| slot.take());
    match sender {
        Some(tx) => {
            let _ = tx.send(redirect);
        }
        None => debug!("sign-in redirect already handled"),
    }
    reply
}

/// The authorization code carried by a redirect, checked against `expected_state`.
fn check_redirect(params: &HashMap<String, String>, expected_state: &str) -> Result<String, HostError> {
    if let Some(error) = params.get("error") {
        return Err(HostError::Rejected(format!("google sign-in failed: {error}")));
    }
    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(HostError::Rejected("google sign-in state mismatch".into()));
    }
    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(code.clone()),
        _ => Err(HostError::Rejected("google sign-in returned no code".into())),
    }
}

fn form_encode(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
