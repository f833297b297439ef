mod note;

pub use note::{Note, SortKey, TIMESTAMP_FORMAT};
