pub mod candidate;
pub mod donor;
pub mod enums;
pub mod request;

pub use candidate::*;
pub use donor::*;
pub use enums::*;
pub use request::*;
