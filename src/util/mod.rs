
/// Generic functionality for reading/writing serializable objects and text files
pub mod file_io;
