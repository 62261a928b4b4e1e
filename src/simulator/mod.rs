pub mod engine;
pub mod gbm;
pub mod random;
