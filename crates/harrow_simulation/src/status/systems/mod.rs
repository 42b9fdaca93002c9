//! Status systems

pub mod damage;
pub mod stamina;

pub use damage::*;
pub use stamina::*;
