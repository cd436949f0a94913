pub mod mem_fs;

pub use mem_fs::{MemFile, MemFs, WANT_ERROR};
