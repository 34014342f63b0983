#![forbid(unsafe_code)]

//! Runtime: the Model/Cmd program loop and timer subscriptions.

pub mod program;
pub mod subscription;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use subscription::{Every, SubId, Subscription};
