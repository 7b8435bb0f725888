mod catchers;
pub mod search;
pub mod status;
pub mod video;

pub use catchers::*;
pub use search::*;
pub use status::*;
pub use video::*;
