pub mod cli;
pub mod error;
pub mod gitlab;
pub mod model;
pub mod observer;
pub mod report;
pub mod util;
