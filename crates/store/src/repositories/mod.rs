//! Repositories over the in-memory complaint store.

pub mod complaint;

pub use complaint::ComplaintRepository;
