pub mod classify;
pub mod duplicate;
pub mod export;
pub mod extraction;
pub mod import;
pub mod processor; // Extraction run: acquire → units → decide → dedupe → classify
pub mod units;
