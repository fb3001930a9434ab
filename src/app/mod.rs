pub mod dispatch;
pub mod shell;

pub use dispatch::dispatch;
