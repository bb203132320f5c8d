pub mod serve;
pub mod summarize;

pub use serve::handle_serve;
pub use summarize::handle_summarize;
