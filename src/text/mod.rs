pub mod engine;
pub mod flow;
pub mod font;
pub mod resolve;
