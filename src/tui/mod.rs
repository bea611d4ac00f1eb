mod form;
mod handler;
mod ui;

pub use form::{Form, FormField};
pub use handler::{handle_key_event, AppAction};
pub use ui::draw;
