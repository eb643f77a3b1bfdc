mod enums;
mod judge;
mod record;

pub use enums::*;
pub use judge::*;
pub use record::*;
