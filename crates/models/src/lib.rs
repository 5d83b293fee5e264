pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod posting;
pub mod posting_comment;
pub mod posting_sympathy;
pub mod posting_count;

#[cfg(test)]
mod tests;
