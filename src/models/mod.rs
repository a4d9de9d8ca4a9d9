pub mod booking;
pub mod contact;
pub mod doctor;
pub mod response;
pub mod user;

pub use booking::*;
pub use contact::*;
pub use doctor::*;
pub use response::*;
pub use user::*;
