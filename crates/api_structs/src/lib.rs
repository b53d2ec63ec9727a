mod reminder;
mod round;
mod status;

pub mod dtos {
    pub use crate::reminder::dtos::*;
    pub use crate::round::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::round::api::*;
pub use crate::status::api::*;
