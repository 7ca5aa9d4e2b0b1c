pub mod catalog_generator;
