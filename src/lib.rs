pub mod info;
pub mod tmdb;
