// Library root: re-exports all modules so integration tests and the binary
// can reach the app loop, the message protocol and the terminal UI.

pub mod app;
pub mod protocol;
pub mod tui;
