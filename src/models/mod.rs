//! Regression models mapping standardized features to scores.

mod traits;

pub mod forest;
pub mod linear;
pub mod tree;

pub use forest::{ForestConfig, RandomForestRegressor};
pub use linear::{RidgeConfig, RidgeRegressor};
pub use traits::{BoxedRegressor, Regressor, RegressorSpec};
pub use tree::{DecisionTreeRegressor, TreeConfig};
