pub mod file;
pub mod pcm;

pub use file::AudioFile;
