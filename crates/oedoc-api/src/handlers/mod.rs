pub mod file;
pub mod file_lookup;
pub mod object_list;
