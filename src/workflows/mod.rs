pub mod planner;
pub mod renamer;
