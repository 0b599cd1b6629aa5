// Core domain types shared by the engine and the HTTP layer

pub mod errors;
pub mod models;
