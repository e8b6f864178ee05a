pub mod snapshot_loader;

pub use snapshot_loader::{load_all_snapshots, load_snapshot_file};
