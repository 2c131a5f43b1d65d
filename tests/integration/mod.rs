//! Integration tests for Parrot
//!
//! This module contains integration tests that verify the complete
//! request/response flow through the real router against a mock Gemini
//! server.

mod chat;
