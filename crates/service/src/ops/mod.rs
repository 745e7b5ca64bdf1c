#![forbid(unsafe_code)]

mod comments;
mod projects;
mod signup;
mod tasks;

pub use comments::*;
pub use projects::*;
pub use signup::*;
pub use tasks::*;
