//! Cross-cutting helpers shared by the service and API layers.

pub mod security_context;

pub use security_context::{SecurityContext, TaskLocalSecurityContext};

#[cfg(any(test, feature = "test-utils"))]
pub use security_context::MockSecurityContext;
