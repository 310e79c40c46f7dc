pub mod day_plan;
pub mod itinerary;
