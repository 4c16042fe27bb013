pub mod file_loader;
pub mod handle;
pub mod normalize;

pub use file_loader::FileLoader;
pub use handle::{FileBag, FileHandle};
pub use normalize::{sanitize_namespace, FileReference, FileSource};
