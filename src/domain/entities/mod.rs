pub mod document;
pub mod indexed_record;
