mod pretty;

pub use pretty::{print_response, print_sources};
