pub mod agent;
pub mod backend;
pub mod campaign;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod notify;
pub mod nullable;
pub mod output;
pub mod settings;
pub mod typedid;

pub use backend::{Backend, HttpApi, RestBackend};
pub use config::DashboardConfig;
pub use error::Error;
