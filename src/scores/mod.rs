pub mod record;
pub mod store;

pub use record::ScoreRecord;
pub use store::{DEFAULT_SCORES_FILE, ScoreStore};
