#![no_main]

use arbitrary::Arbitrary;
use jsonkit::{Grammar, ParseOptions, parse};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    zon: bool,
    max_depth: u8,
    source: String,
}

fuzz_target!(|input: Input| {
    let grammar = if input.zon { Grammar::Zon } else { Grammar::Json };
    let options = ParseOptions::new().with_max_depth(input.max_depth.clamp(1, 64) as usize);

    match parse(&input.source, grammar, &options) {
        Ok(ast) => {
            // A published tree always has a root and re-serializes.
            assert!(ast.root().is_some());
            let _ = ast.write_json();
        }
        Err(err) => {
            assert!(err.span.end as usize <= input.source.len() + 1);
        }
    }
});
