pub mod credit;
pub mod movie;
