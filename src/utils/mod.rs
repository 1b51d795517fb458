pub mod math;
pub mod logging;

pub use logging::init_logging;
