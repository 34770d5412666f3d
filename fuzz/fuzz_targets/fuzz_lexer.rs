#![no_main]

use jsonkit::{Grammar, TokenKind, TokenStream};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = core::str::from_utf8(data) else {
        return;
    };

    for grammar in [Grammar::Json, Grammar::Zon] {
        let tokens = TokenStream::tokenize(source, grammar).collect_tokens();

        // Spans tile the input: contiguous, in bounds, one zero-width eof.
        let mut offset = 0u32;
        let mut eofs = 0usize;
        for tok in &tokens {
            if tok.kind == TokenKind::Eof {
                eofs += 1;
                assert_eq!(tok.span.start as usize, source.len());
                assert!(tok.span.is_empty());
                continue;
            }
            assert_eq!(tok.span.start, offset);
            assert!(tok.span.end as usize <= source.len());
            assert!(tok.span.text(source).is_some());
            offset = tok.span.end;
        }
        assert_eq!(offset as usize, source.len());
        assert_eq!(eofs, 1);
    }
});
