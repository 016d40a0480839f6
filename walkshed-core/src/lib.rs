pub mod buffer;
pub mod collection;
pub mod projection;
pub mod util;
