pub mod mapper;
pub mod models;
pub mod renderer;
