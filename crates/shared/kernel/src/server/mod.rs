//! System routes shared by every docsite server.

mod health;
pub mod router;
