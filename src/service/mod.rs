pub mod export_service;
pub mod extraction_service;
pub mod openai_service;
pub mod prompts;
