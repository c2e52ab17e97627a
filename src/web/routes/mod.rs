pub mod palette_routes;
pub mod project_routes;
