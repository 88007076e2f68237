//! Server-rendered page and system handlers.

mod pages;
mod system;


pub use pages::*;
pub use system::*;
