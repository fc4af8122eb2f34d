//! Integration and E2E tests for Haven (see `tests/`)
