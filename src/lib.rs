//! gql-sql-annotate - GraphQL schema annotation for SQL schema generation
//!
//! This crate decorates hand-written GraphQL schemas for consumption by a
//! GraphQL-to-SQL schema compiler:
//! - A conversion map drives which scalar identifiers get rewritten
//! - Each mapped scalar reference (with optional `!` marker) becomes
//!   `<baseType> @sql(..., nullable: <bool>)`
//! - The decorated schema is prefixed with the `@sql` directive declaration
//!   and written out as the compiler's type defs

pub mod config;
pub mod directive_map;
pub mod rewriter;
pub mod type_defs;
