pub(crate) mod definition;
pub(crate) mod index;
pub(crate) mod parameters;
