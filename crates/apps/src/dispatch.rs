use {
    agora_common::{Error, Result},
    async_trait::async_trait,
};

use crate::call::{Call, CallResponse};

/// The generic call-execution path.
///
/// Both inbound app invocations and resumed link calls go through this
/// contract; the transport that actually reaches the app's endpoint lives
/// outside this workspace.
#[async_trait]
pub trait CallDispatcher: Send + Sync {
    async fn execute(&self, call: Call) -> Result<CallResponse>;
}

/// Placeholder dispatcher for wiring the subsystem before a transport exists.
pub struct NoopCallDispatcher;

#[async_trait]
impl CallDispatcher for NoopCallDispatcher {
    async fn execute(&self, _call: Call) -> Result<CallResponse> {
        Err(Error::upstream("call dispatch not configured"))
    }
}
