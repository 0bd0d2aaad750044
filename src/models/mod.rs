pub mod animal;
pub mod feed_plan;
pub mod herd;
pub mod task;

pub use animal::*;
pub use feed_plan::*;
pub use herd::*;
pub use task::*;
