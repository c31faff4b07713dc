pub mod icon;
pub mod motion;
pub mod scheduler;
