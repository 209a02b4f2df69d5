//! Ephemeral interactive sessions.
//!
//! A session is the state behind one paginated menu message: which page and
//! category it shows and who may press its buttons. Sessions live in memory only
//! and expire after [`SESSION_TTL`].

pub mod manager;
pub mod pagination;

pub use manager::{ActionOutcome, SessionError, SessionManager, SESSION_TTL};
pub use pagination::{
    max_page, Category, PageAction, PaginationSession, RenderResult, CUSTOM_ID_PREFIX,
    ITEMS_PER_PAGE,
};
