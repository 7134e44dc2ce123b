//! Component C3: lexical sub-analyses shared by both rule engines. Every
//! function here is pure and independent of [`crate::rules::context::AnalysisContext`].

pub mod for_var;
pub mod parens;
pub mod percent_tilde;
pub mod set_a;
pub mod tokenizer;
