pub mod form;
pub mod gauge;

pub use form::FormField;
pub use gauge::{adg_gauge, percent_gauge, weight_gauge};
