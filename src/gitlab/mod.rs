pub mod client;
pub mod commits;
pub mod projects;

pub use client::{ErrorPolicy, GitLabClient, HttpResponse, ReqwestTransport, Transport, PER_PAGE};
