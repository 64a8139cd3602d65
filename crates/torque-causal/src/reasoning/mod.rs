//! Queries over a compiled [`CausalGraph`](crate::CausalGraph).

pub mod backward;
pub mod discrimination;
pub mod forward;
