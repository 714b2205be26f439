pub mod drawing_service;
pub mod job_service;
pub mod temp_image_service;
pub mod user_service;
