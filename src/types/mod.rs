pub mod movie;
pub mod tmdb;
