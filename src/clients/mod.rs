pub mod api_client;
pub mod gini_client;

pub use api_client::ApiClient;
pub use gini_client::GiniApiClient;
