pub mod log_store;
pub mod notifier;
