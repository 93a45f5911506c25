//! Application state and logic

mod dispatcher;
mod event;
mod state;

pub use dispatcher::Dispatcher;
pub use event::{Event, Handler};
pub use state::{App, Dropdown, Focus};
