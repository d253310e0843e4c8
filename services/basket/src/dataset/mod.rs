pub mod loader;

pub use loader::{frame_to_table, load_transactions, normalize_item, read_item_frame, DatasetConfig};
