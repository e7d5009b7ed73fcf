pub mod diagnostics;
pub mod hover;
