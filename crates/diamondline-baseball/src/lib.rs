// Baseball moneyline grading: factor calculators, confidence aggregation,
// grade selection, and the text that explains each pick.

pub mod ballpark;
pub mod confidence;
pub mod display;
pub mod factors;
pub mod feed;
pub mod narrative;
pub mod provider;
pub mod reasoning;
pub mod selector;
