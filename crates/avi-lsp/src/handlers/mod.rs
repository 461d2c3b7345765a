pub mod completion;
pub mod diagnostics;
