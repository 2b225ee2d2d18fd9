pub mod play;
pub mod progress;
pub mod simulate;
