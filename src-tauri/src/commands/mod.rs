pub mod icon;
pub mod motion;
