pub mod controller;
pub mod geometry;
