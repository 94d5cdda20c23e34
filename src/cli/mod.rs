mod server;
mod setting;

pub use server::*;
pub use setting::*;
