//! Menu actions

/// One menu entry, keyed by its numeric selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    FetchOne,
    ListAll,
    Update,
    Delete,
    Exit,
}

impl Action {
    /// Resolve a selector; `None` for anything outside the menu
    pub fn from_selector(selector: i64) -> Option<Self> {
        match selector {
            1 => Some(Action::Create),
            2 => Some(Action::FetchOne),
            3 => Some(Action::ListAll),
            4 => Some(Action::Update),
            5 => Some(Action::Delete),
            0 => Some(Action::Exit),
            _ => None,
        }
    }

    pub fn selector(&self) -> i64 {
        match self {
            Action::Create => 1,
            Action::FetchOne => 2,
            Action::ListAll => 3,
            Action::Update => 4,
            Action::Delete => 5,
            Action::Exit => 0,
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Action::Create => "Add product",
            Action::FetchOne => "Get product by id",
            Action::ListAll => "List products",
            Action::Update => "Update product",
            Action::Delete => "Delete product",
            Action::Exit => "Exit",
        }
    }

    /// Stable name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::FetchOne => "fetch_one",
            Action::ListAll => "list_all",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Exit => "exit",
        }
    }

    /// Menu order
    pub fn all() -> &'static [Action] {
        &[
            Action::Create,
            Action::FetchOne,
            Action::ListAll,
            Action::Update,
            Action::Delete,
            Action::Exit,
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
