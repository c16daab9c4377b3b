pub mod jwt;
pub mod password;
pub mod text;

pub use jwt::*;
pub use password::*;
pub use text::*;
