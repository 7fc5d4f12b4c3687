//! Terminal presentation layer: state, visual mappings, rendering and the HTTP client.

pub mod api;
pub mod rating;
pub mod state;
pub mod terminal;
pub mod view;

pub use api::{CompareClient, FetchError};
pub use state::MeterState;
