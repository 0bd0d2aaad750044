use serde::{Deserialize, Serialize};

/// Daily feed ration derived from a single body weight. Each figure is
/// rounded on its own, so `forage_kg + concentrate_kg` may drift from
/// `daily_dmi_kg` by a cent of a kilogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedPlan {
    pub body_weight_kg: f64,
    pub daily_dmi_kg: f64,
    pub forage_kg: f64,
    pub concentrate_kg: f64,
}
