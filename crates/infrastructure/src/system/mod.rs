pub mod root_hints;

pub use root_hints::{load_root_hints, parse_root_hints, BUILTIN_ROOT_SERVERS};
