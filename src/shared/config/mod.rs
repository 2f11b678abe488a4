pub mod environment;

pub use environment::{
    initialize_logging_system, load_environment_variables, ApiConfig, EnvironmentConfig,
};
