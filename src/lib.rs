pub mod api;
pub mod cli;
pub mod combo;
pub mod form;
pub mod io;
pub mod logging;
pub mod model;
pub mod tui;
