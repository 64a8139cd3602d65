//! Built-in authored knowledge.
//!
//! [`builtin`] is the single, ordered initialization entry point. Nothing is
//! registered implicitly; callers own the returned registry.

mod charging;
mod cooling;
mod engine_management;
mod lubrication;

use torque_core::TorqueResult;

use crate::registry::{KnowledgeBase, KnowledgeBaseBuilder};

/// Build the built-in knowledge base.
pub fn builtin() -> TorqueResult<KnowledgeBase> {
    let mut builder = KnowledgeBaseBuilder::new();
    register_builtin(&mut builder)?;
    Ok(builder.build())
}

/// Register every built-in system, component, and failure mode into an
/// existing builder, so callers can layer their own records on top.
pub fn register_builtin(builder: &mut KnowledgeBaseBuilder) -> TorqueResult<()> {
    cooling::register(builder)?;
    lubrication::register(builder)?;
    charging::register(builder)?;
    engine_management::register(builder)?;
    Ok(())
}
