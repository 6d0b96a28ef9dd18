pub mod genre_store;
pub mod tmdb;
