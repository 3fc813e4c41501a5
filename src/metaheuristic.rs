pub mod aco;
mod route;
mod supervisor;

pub use aco::Aco;
pub use route::Route;
pub use supervisor::{Message, MessageInfo, Supervisor};
