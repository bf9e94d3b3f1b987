pub mod planner;
pub mod retry;

pub use planner::TripPlanner;
pub use retry::RetryPolicy;
