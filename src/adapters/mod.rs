// Adapters layer: concrete implementations of the domain ports.

pub mod fs;
pub mod process;

pub use fs::LocalFileSystem;
pub use process::ProcessRunner;
