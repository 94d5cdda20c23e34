mod model;
mod observer;
pub mod referral;
mod repository;
pub mod services;
pub mod subscription;

pub use model::*;
pub use observer::*;
pub use repository::*;
