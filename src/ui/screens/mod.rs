pub mod animals;
pub mod dashboard;
pub mod feed;
pub mod tasks;
pub mod weights;

pub use animals::{AnimalField, AnimalForm, AnimalsScreen};
pub use dashboard::DashboardScreen;
pub use feed::FeedScreen;
pub use tasks::TasksScreen;
pub use weights::{WeightField, WeightForm, WeightsScreen};
