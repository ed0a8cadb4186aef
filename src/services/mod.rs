pub mod catalog;
pub mod excel;
pub mod file_processor;
pub mod probe;
pub mod three_year;
