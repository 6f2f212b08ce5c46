mod railsim_app;
mod railsim_operation;

pub use railsim_app::RailsimApp;
pub use railsim_operation::RailsimOperation;
