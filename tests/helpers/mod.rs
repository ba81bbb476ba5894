#![allow(dead_code)]
#![allow(unused_imports)]
pub mod payloads;
pub mod test_app;
pub mod test_db;

pub use payloads::*;
pub use test_app::*;
pub use test_db::*;
