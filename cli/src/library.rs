pub mod cli;
pub mod constant;
pub mod dialog;
pub mod form;
pub mod logging;
pub mod progress;
pub mod table;
