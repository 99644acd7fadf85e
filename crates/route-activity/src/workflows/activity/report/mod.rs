mod filter;
mod summary;
pub mod views;

pub use filter::{salesperson_options, SalespersonFilter, ALL_SALESPEOPLE};
pub use summary::{inactive_clients, route_summary, salesperson_summary, ActivityReport};
