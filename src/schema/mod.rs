pub mod character;
pub mod event;
pub mod flag;
