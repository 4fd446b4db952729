mod iterative_resolver;
mod server_selector;

pub use iterative_resolver::IterativeResolver;
pub use server_selector::{Delegation, ServerSelector};
