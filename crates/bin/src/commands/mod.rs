pub mod check;
pub mod encode;
pub mod hydrate;
