pub mod events;
pub mod fragments;
pub mod models;
pub mod neuwo;
pub mod observability;
pub mod rtd;
pub mod segments;
