//! Request-scoped identity context.
//!
//! Holds the verified caller identity for exactly one in-flight request,
//! ambiently accessible to anything running inside that request without
//! threading a parameter through every call. The binding is task-local:
//! concurrent requests on shared worker threads never see each other's
//! identity, and the binding is torn down on every exit path (normal
//! completion, error, panic, cancellation) because it dies with the scoped
//! future.

use std::future::Future;
use std::sync::Arc;

use crate::principal::Principal;

tokio::task_local! {
    static CURRENT_IDENTITY: Arc<RequestIdentity>;
}

/// The verified identity bound to one request: the principal plus the raw
/// assertion it was built from, kept for outbound forwarding.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    pub principal: Principal,
    pub token: String,
}

/// Accessor for the current request's identity binding.
///
/// There is no `install`/`clear` pair to misuse: [`scope`](Self::scope) is
/// the only way to bind an identity, and the binding cannot outlive the
/// future it wraps. Anonymous requests simply run outside any scope.
pub struct IdentityContext;

impl IdentityContext {
    /// Runs `fut` with `identity` bound as the current identity.
    ///
    /// Rebinding inside an existing scope shadows the outer binding for the
    /// duration of the inner future only.
    pub async fn scope<F>(identity: Arc<RequestIdentity>, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_IDENTITY.scope(identity, fut).await
    }

    /// The identity bound to the current task scope, or `None` for an
    /// anonymous or out-of-request caller.
    pub fn current() -> Option<Arc<RequestIdentity>> {
        CURRENT_IDENTITY.try_with(|identity| identity.clone()).ok()
    }

    /// The current principal, if any.
    pub fn current_principal() -> Option<Principal> {
        Self::current().map(|identity| identity.principal.clone())
    }

    /// The raw assertion bound to the current request, if any. This is what
    /// gets copied unchanged onto outbound service calls.
    pub fn current_token() -> Option<String> {
        Self::current().map(|identity| identity.token.clone())
    }
}
