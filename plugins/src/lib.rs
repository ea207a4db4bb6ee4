//! Command builders for every tool the console can chain.

pub mod factory;
pub mod handlers;
pub mod launch;
pub mod plan;
pub mod quote;

pub use factory::build_handler;
pub use launch::HostTerminal;
pub use plan::{plan_session, PlanArgs, PlanOutcome, NOTHING_TO_RUN};
