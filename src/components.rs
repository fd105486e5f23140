mod auth_forms;
pub use auth_forms::*;

mod auth_switch;
pub use auth_switch::*;

mod notices;
pub use notices::*;

mod shopping_list;
pub use shopping_list::*;

pub mod user;
