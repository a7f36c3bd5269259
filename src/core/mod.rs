pub mod catalog;
pub mod config;
pub mod driver;
pub mod effect;
pub mod eligibility;
pub mod evolution;
pub mod registry;
pub mod render;
pub mod selector;
pub mod template;
