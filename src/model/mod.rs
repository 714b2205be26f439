pub mod counter;
pub mod job;
pub mod temp_image;
pub mod user;
