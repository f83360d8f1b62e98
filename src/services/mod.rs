pub mod category;
pub mod lifecycle;
pub mod placer;
pub mod processor;
pub mod semester;
pub mod sorter_service;
pub mod staging;
pub mod year;
