mod record;
mod record_type;

pub use record::{RData, ResourceRecord, CLASS_IN};
pub use record_type::RecordType;
