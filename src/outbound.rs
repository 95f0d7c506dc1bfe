//! Identity-forwarding HTTP client for service-to-service calls.
//!
//! When this service calls a peer while handling a request, the caller's
//! raw identity assertion is copied unchanged onto the outbound call. The
//! peer verifies it independently; nothing is re-signed and no trust is
//! asserted here. Anonymous requests forward no credential; a credential
//! that cannot be carried fails the call closed rather than proceeding
//! unauthenticated.

use axum::http::header;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use medichart_auth::IdentityContext;

/// Failures of an outbound service call.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The bound assertion cannot be carried as a request header. The call
    /// must not proceed unauthenticated.
    #[error("identity assertion cannot be attached to the outbound request")]
    Credential,
    /// Transport-level failure reaching the peer.
    #[error("request to {service} failed: {source}")]
    Transport {
        service: String,
        #[source]
        source: reqwest::Error,
    },
    /// The peer answered with a non-success status.
    #[error("{service} returned status {status}")]
    Status {
        service: String,
        status: reqwest::StatusCode,
    },
}

/// HTTP client for one peer service, forwarding the current request's
/// identity on every call.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    service_name: String,
    base_url: String,
}

impl ServiceClient {
    pub fn new(service_name: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            service_name: service_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POSTs `body` as JSON to `path` on the peer, carrying the caller's
    /// assertion when one is bound.
    pub async fn post_json<Req, Res>(&self, path: &str, body: &Req) -> Result<Res, ForwardError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);

        if let Some(credential) = self.bearer_header()? {
            request = request.header(header::AUTHORIZATION, credential);
        } else {
            debug!(service = %self.service_name, path, "forwarding without credential (anonymous caller)");
        }

        let response = request.send().await.map_err(|source| ForwardError::Transport {
            service: self.service_name.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status {
                service: self.service_name.clone(),
                status,
            });
        }

        response.json().await.map_err(|source| ForwardError::Transport {
            service: self.service_name.clone(),
            source,
        })
    }

    /// GETs `path` on the peer, carrying the caller's assertion when one is
    /// bound.
    pub async fn get_json<Res>(&self, path: &str) -> Result<Res, ForwardError>
    where
        Res: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);

        if let Some(credential) = self.bearer_header()? {
            request = request.header(header::AUTHORIZATION, credential);
        }

        let response = request.send().await.map_err(|source| ForwardError::Transport {
            service: self.service_name.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status {
                service: self.service_name.clone(),
                status,
            });
        }

        response.json().await.map_err(|source| ForwardError::Transport {
            service: self.service_name.clone(),
            source,
        })
    }

    /// The `Authorization` value for the current request scope: the bound
    /// assertion verbatim, or `None` for an anonymous caller.
    ///
    /// Fails closed when the token cannot form a valid header value, so a
    /// mangled credential is never silently dropped downstream.
    fn bearer_header(&self) -> Result<Option<HeaderValue>, ForwardError> {
        match IdentityContext::current_token() {
            Some(token) => HeaderValue::from_str(&format!("Bearer {token}"))
                .map(Some)
                .map_err(|_| ForwardError::Credential),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use medichart_auth::{Principal, RequestIdentity, UserType};

    fn identity(token: &str) -> Arc<RequestIdentity> {
        Arc::new(RequestIdentity {
            principal: Principal::new(
                3,
                "pwaters",
                "pwaters@example.com",
                UserType::Patient,
                vec!["ROLE_PATIENT".to_string()],
                vec![],
            ),
            token: token.to_string(),
        })
    }

    #[tokio::test]
    async fn test_bearer_header_carries_token_verbatim() {
        let client = ServiceClient::new("notifications", "http://localhost:3007");
        IdentityContext::scope(identity("abc.def.ghi"), async move {
            let header = client.bearer_header().unwrap().unwrap();
            assert_eq!(header.to_str().unwrap(), "Bearer abc.def.ghi");
        })
        .await;
    }

    #[tokio::test]
    async fn test_anonymous_scope_attaches_nothing() {
        let client = ServiceClient::new("notifications", "http://localhost:3007");
        assert!(client.bearer_header().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_uncarriable_credential_fails_closed() {
        let client = ServiceClient::new("notifications", "http://localhost:3007");
        IdentityContext::scope(identity("bad\ntoken"), async move {
            assert!(matches!(
                client.bearer_header(),
                Err(ForwardError::Credential)
            ));
        })
        .await;
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ServiceClient::new("notifications", "http://localhost:3007/");
        assert_eq!(client.base_url, "http://localhost:3007");
    }
}
