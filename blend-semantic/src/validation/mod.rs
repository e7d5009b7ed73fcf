pub mod constant;
pub mod expression;
pub mod type_checker;
