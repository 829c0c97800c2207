pub mod advisories;
pub mod buydown;
pub mod compensation;
pub mod consolidation;
pub mod engine;
pub mod fees;
pub mod input;
pub mod normalize;
pub mod payment;
pub mod presentation;
pub mod rules;
