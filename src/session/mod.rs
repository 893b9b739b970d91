//! Player session state: money and play/build mode

pub mod mode;
pub mod wallet;

pub use mode::{GameMode, ModeToggle};
pub use wallet::Wallet;
