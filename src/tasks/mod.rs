pub mod cancel;
pub mod chain;

pub use cancel::{with_cancel, CancelToken};
pub use chain::{delay_then, for_each_sequential, then};
