// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open or decode document: {0}")]
    Open(#[from] lopdf::Error), // Whole-document decode failure, fatal to the run
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Could not read document: {0}")]
    Read(#[from] ReadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Distinct from Read: the document was decoded fine, the scan just
    // matched nothing in any category.
    #[error("No matching numbers found in {0}")]
    NoMatches(String),
}
