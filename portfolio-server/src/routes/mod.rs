mod contact;
mod github;

pub use contact::{contact_handler, ContactResponse, CONTACT_SUCCESS_MESSAGE};
pub use github::{github_repos_handler, github_stats_handler, github_user_handler, RepoParams};
