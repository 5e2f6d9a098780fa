mod chat;
mod dashboard;
mod debounce;
mod pager;
mod source;
pub mod speakers;
mod view;

#[cfg(test)]
pub(crate) mod test_utils;

pub use chat::{ChatMessage, ChatSession, Role};
pub use dashboard::{
    ALL_UTTERANCES_TOP, Dashboard, DashboardMetrics, TOP_LIST_LEN, load_dashboard,
};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use pager::{
    DEFAULT_PAGE_SIZE, Facets, FeedItem, FeedSnapshot, FetchOutcome, ItemKey, PagedFeed,
};
pub use source::UtteranceSource;
pub use speakers::SpeakerFilter;
pub use view::{ViewState, load_speakers, load_trends};
