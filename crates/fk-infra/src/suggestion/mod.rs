mod canned;

pub use canned::CannedSuggestionProvider;
