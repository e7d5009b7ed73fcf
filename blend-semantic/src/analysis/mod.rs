pub mod function_analyzer;
pub mod variable_analyzer;
