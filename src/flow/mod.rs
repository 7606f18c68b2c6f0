pub mod config;
pub mod conversion;
pub mod definition;
pub mod keys;
pub mod work_unit;

pub use config::*;
pub use conversion::*;
pub use definition::*;
pub use work_unit::*;
