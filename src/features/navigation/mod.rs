pub mod client;
pub mod debounce;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use client::CatalogClient;
pub use debounce::SearchDebouncer;
pub use services::NavigationService;
pub use state::ExpansionState;
