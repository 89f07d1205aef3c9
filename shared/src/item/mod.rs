pub mod catalog;
pub mod item_filter;
pub mod item_kind;
pub mod stored_stack;
