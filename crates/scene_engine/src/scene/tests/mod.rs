//! Scenario tests spanning transforms, hierarchy and walker

mod hierarchy_integration;
