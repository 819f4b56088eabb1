pub mod client_routes;
pub mod company_routes;
pub mod geocoding_routes;
pub mod quote_routes;
pub mod vehicle_routes;
