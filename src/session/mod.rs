pub mod completion;
pub mod plan;
pub mod planner;
pub mod profile;
