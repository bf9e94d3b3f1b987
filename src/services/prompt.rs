use crate::types::TripDetails;

/// Render the generation prompt for a validated trip.
pub fn build_trip_prompt(trip: &TripDetails) -> String {
    let TripDetails {
        from_city,
        destination,
        budget,
        days,
        group_type,
        transport,
    } = trip;

    format!(
        "Create a detailed {days}-day travel plan.

TRAVEL DETAILS:
- From: {from_city}
- To: {destination}
- Transport Mode: {transport}
- Group Type: {group_type}
- Budget: ₹{budget}
- Days: {days}

REQUIREMENTS:
1. Day-wise full itinerary (morning, afternoon, evening).
2. Best transport suggestions based on mode: {transport}.
3. Include approximate travel cost from {from_city} to {destination}.
4. Food recommendations (cheap + famous options).
5. Must follow the group type ({group_type}) for stay, food, and activities.
6. Very detailed cost breakdown for:
   - Travel
   - Food
   - Accommodation
   - Local transport
   - Extras
7. Make it realistic and easy to follow.
8. Keep recommendations low-cost to fit within ₹{budget} budget.
"
    )
}
