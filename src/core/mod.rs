pub mod checkpoint;
pub mod editor;
pub mod save;
pub mod session;
pub mod stopwatch;
