//! Pagination state for interactive menus.
//!
//! Pure state with no I/O: the manager owns sessions and serializes access, this
//! module only knows how a page moves and what it shows.

/// Items shown per page.
pub const ITEMS_PER_PAGE: usize = 10;

/// Custom id prefix shared by all pagination buttons.
pub const CUSTOM_ID_PREFIX: &str = "help_";

/// Which item list a menu is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Commands anyone can run.
    General,
    /// Admin-only commands.
    Admin,
}

impl Category {
    /// Returns the other category.
    pub fn toggled(self) -> Self {
        match self {
            Self::General => Self::Admin,
            Self::Admin => Self::General,
        }
    }

    /// Returns the section heading for this category.
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General Commands",
            Self::Admin => "Admin Commands",
        }
    }
}

/// A button action on a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// One page back.
    Previous,
    /// One page forward.
    Next,
    /// Switch between general and admin items.
    ToggleCategory,
    /// Dismiss the menu.
    Close,
}

impl PageAction {
    /// Returns the button custom id for this action.
    pub fn custom_id(self) -> &'static str {
        match self {
            Self::Previous => "help_prev",
            Self::Next => "help_next",
            Self::ToggleCategory => "help_toggle",
            Self::Close => "help_close",
        }
    }

    /// Parses a button custom id.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            "help_prev" => Some(Self::Previous),
            "help_next" => Some(Self::Next),
            "help_toggle" => Some(Self::ToggleCategory),
            "help_close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// Highest 0-based page index for `len` items; 0 for an empty list.
pub fn max_page(len: usize) -> usize {
    len.saturating_sub(1) / ITEMS_PER_PAGE
}

/// Per-message menu state.
#[derive(Debug, Clone)]
pub struct PaginationSession {
    general: Vec<String>,
    admin: Vec<String>,
    current_page: usize,
    category: Category,
    owner_id: String,
}

impl PaginationSession {
    /// Creates a session on the first general page.
    pub fn new(owner_id: impl Into<String>, general: Vec<String>, admin: Vec<String>) -> Self {
        Self {
            general,
            admin,
            current_page: 0,
            category: Category::General,
            owner_id: owner_id.into(),
        }
    }

    /// Returns the only user allowed to act on this session.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Returns the 0-based page index.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the category being shown.
    pub fn category(&self) -> Category {
        self.category
    }

    fn active_items(&self) -> &[String] {
        match self.category {
            Category::General => &self.general,
            Category::Admin => &self.admin,
        }
    }

    /// Returns the last page index of the active category.
    pub fn max_page(&self) -> usize {
        max_page(self.active_items().len())
    }

    /// Applies a navigation action. `Close` leaves the state untouched; removing
    /// the session is the manager's job.
    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::Previous => {
                self.current_page = self.current_page.saturating_sub(1);
            }
            PageAction::Next => {
                self.current_page = (self.current_page + 1).min(self.max_page());
            }
            PageAction::ToggleCategory => {
                self.category = self.category.toggled();
                self.current_page = 0;
            }
            PageAction::Close => {}
        }
    }

    /// Describes the current page.
    pub fn render(&self) -> RenderResult {
        let items = self.active_items();
        let max_page = self.max_page();
        let page = self.current_page.min(max_page);
        let start = (page * ITEMS_PER_PAGE).min(items.len());
        let end = (start + ITEMS_PER_PAGE).min(items.len());

        RenderResult {
            category: self.category,
            items: items[start..end].to_vec(),
            page,
            max_page,
            general_total: self.general.len(),
            admin_total: self.admin.len(),
        }
    }
}

/// What a renderer needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Category shown.
    pub category: Category,
    /// Items on this page.
    pub items: Vec<String>,
    /// 0-based page index.
    pub page: usize,
    /// Last page index.
    pub max_page: usize,
    /// Number of general items.
    pub general_total: usize,
    /// Number of admin items.
    pub admin_total: usize,
}

impl RenderResult {
    /// Returns the 1-based "current/total" label.
    pub fn page_label(&self) -> String {
        format!("Page {}/{}", self.page + 1, self.max_page + 1)
    }

    /// Returns whether the previous control is clickable.
    pub fn previous_enabled(&self) -> bool {
        self.page > 0
    }

    /// Returns whether the next control is clickable.
    pub fn next_enabled(&self) -> bool {
        self.page < self.max_page
    }
}
