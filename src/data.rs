mod item;
pub use item::*;

mod profile;
pub use profile::*;
