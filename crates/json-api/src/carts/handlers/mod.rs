pub(crate) mod add_item;
pub(crate) mod decrease;
pub(crate) mod get;
pub(crate) mod increase;
pub(crate) mod remove_item;
