/// Console adapters for operation logging
mod log_facade_logger;

pub use log_facade_logger::LogFacadeLogger;
