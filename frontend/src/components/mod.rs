pub mod header;
pub mod hero;
pub mod lazy;
pub mod modal;
pub mod nav;
pub mod reveal;
pub mod search;
pub mod styles;
