pub mod route_cost;
pub mod route_optimizer;
