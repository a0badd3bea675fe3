pub mod anticheat;
pub mod clock;
pub mod error;
pub mod form;
pub mod library;
pub mod matcher;
pub mod practice;
pub mod preprocess;
pub mod session;
pub mod store;
