pub mod trip_types;

pub use trip_types::{PlanResponse, TripDetails, TripField, TripRequest};
