// Unit tests - fast tests with no external dependencies

pub mod dates_test;
pub mod keys_test;
pub mod serialization_test;
pub mod text_test;
pub mod view_test;
