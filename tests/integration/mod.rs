//! Integration tests - full pipeline from raw schema to written type defs

mod annotate_pipeline_tests;
