pub mod yield_record;
pub mod opportunity;
pub mod query;
pub mod report;

pub use yield_record::*;
pub use opportunity::*;
pub use query::*;
pub use report::*;
