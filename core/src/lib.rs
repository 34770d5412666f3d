pub mod ast;
pub mod config;
mod error;
pub mod lexer;
pub mod lint;
pub mod parser;
pub mod schema;
pub mod span;
pub mod stream;
pub mod token;

#[cfg(feature = "std")]
pub mod source;

pub use ast::{Ast, Node, NodeId, NodeRange, StrId};
pub use config::{ParseOptions, RecursionGuard};
pub use error::LimitError;
pub use lexer::{Grammar, JsonLexer, ZonLexer};
pub use lint::{Diagnostic, Linter, LinterOptions, RuleKind, RuleSet, Severity};
pub use parser::{ParseError, ParseErrorKind, parse, parse_stream};
pub use schema::{
    InferOptions, JsonSchema, SchemaType, check_compatible, infer_combined, infer_schema,
    suggest_optimizations,
};
pub use span::{Position, Span};
pub use stream::{BufferedTokens, TokenSource, TokenStream};
pub use token::{Token, TokenKind};

#[cfg(feature = "std")]
pub use source::{ByteSource, MemorySource, OsSource, SourceFile, SourceStat};
