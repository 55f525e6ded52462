pub mod article_fetcher;
pub mod callback_registry;
pub mod completion_client;
pub mod orchestrator_steps;
pub mod prompt_builder;
pub mod quiz_assembler;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod response_parser;
