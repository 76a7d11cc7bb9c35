pub mod cron;
pub mod trigger;

pub use cron::CronExpr;
pub use trigger::{BranchFilter, Trigger, TriggerEvent};
