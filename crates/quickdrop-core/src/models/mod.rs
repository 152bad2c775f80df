mod record;

pub use record::{FileRecord, LinkId, NewFileRecord};
