//! Browser adapters for the ports declared in `buddy-core`.

pub mod llm;
pub mod storage;

#[cfg(test)]
mod tests;
