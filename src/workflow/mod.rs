pub mod document_poller;
pub mod polling_interval;

pub use document_poller::{DocumentPoller, PollDecision};
pub use polling_interval::PollingInterval;
