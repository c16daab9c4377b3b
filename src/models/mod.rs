pub mod address;
pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod common;
pub mod order;
pub mod page;
pub mod user;

pub use address::*;
pub use cart::*;
pub use catalog::*;
pub use chatbot::*;
pub use common::*;
pub use order::*;
pub use page::*;
pub use user::*;
