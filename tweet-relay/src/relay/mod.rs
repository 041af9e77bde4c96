//! Relay pipeline: fetch -> dedup -> send.

mod dedup;
mod sink;
mod sweeper;

pub use dedup::{DedupFilter, FirstSightPolicy, Seen};
pub use sink::RelaySink;
pub use sweeper::{SweepReport, SweepSettings, Sweeper};
