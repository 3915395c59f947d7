pub mod properties;
pub mod transform;

pub use properties::*;
pub use transform::*;
