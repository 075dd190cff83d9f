pub mod silent;
pub mod system;

pub use silent::SilentSpeech;
pub use system::SystemSpeech;
