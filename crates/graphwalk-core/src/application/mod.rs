//! Application services - the traversal engine and its observer seam

/// Paced traversal execution and cancellation
pub mod traversal_service;
