use super::animal::Animal;
use serde::{Deserialize, Serialize};

/// The in-memory herd dataset. This is also the JSON export/import shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Herd {
    pub animals: Vec<Animal>,
}

impl Herd {
    pub fn find(&self, animal_id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == animal_id)
    }

    pub fn find_mut(&mut self, animal_id: &str) -> Option<&mut Animal> {
        self.animals.iter_mut().find(|a| a.id == animal_id)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }
}

/// An animal growing slower than its husbandry target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainShortfall {
    pub animal_id: String,
    pub animal_name: String,
    pub adg_kg: f64,
    pub target_daily_gain_kg: f64,
}

/// Derived herd overview, recomputed from the dataset on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HerdSummary {
    pub head_count: usize,
    /// Animals with at least one weigh-in.
    pub weighed_count: usize,
    /// Mean of the latest weights across weighed animals.
    pub average_weight_kg: Option<f64>,
    /// Animals with a computable ADG (two chronologically distinct weigh-ins).
    pub adg_count: usize,
    /// Mean ADG across animals where it is computable.
    pub average_adg_kg: Option<f64>,
    pub below_target: Vec<GainShortfall>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn find_by_id() {
        let herd = Herd {
            animals: vec![
                Animal::new(
                    "A-1",
                    "Bella",
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    "SRB",
                    0.8,
                ),
                Animal::new(
                    "A-2",
                    "Stella",
                    NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
                    "Holstein",
                    0.9,
                ),
            ],
        };

        assert_eq!(herd.find("A-2").unwrap().name, "Stella");
        assert!(herd.find("A-3").is_none());
        assert_eq!(herd.len(), 2);
        assert!(!herd.is_empty());
    }
}
