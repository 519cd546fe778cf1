//! Campaign scheduling pipeline.
//!
//! Ticks enter either through the trigger endpoint or the optional
//! [`InternalTicker`]; both paths run [`ScheduleEvaluator::run_tick`].

pub mod clock;
pub mod eligibility;
pub mod evaluator;
pub mod ticker;

pub use clock::{Clock, SystemClock};
pub use evaluator::{CampaignTickResult, ScheduleEvaluator, TickSummary};
pub use ticker::InternalTicker;
