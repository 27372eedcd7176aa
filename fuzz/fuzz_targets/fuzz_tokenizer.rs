#![no_main]

use ion_tokenizer::{Tokenizer, TokenizerOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    options: TokenizerOptions,
}

fuzz_target!(|input: Input| {
    let mut tokenizer = Tokenizer::with_options(input.bytes, input.options);

    for _ in 0..10_000 {
        match tokenizer.lookahead(0) {
            Ok(kind) => {
                let start = tokenizer.value_start().unwrap_or(0);
                let end = tokenizer.value_end().unwrap_or(start);
                assert!(start <= end, "token start must not exceed end");

                if kind == ion_tokenizer::TokenKind::Eof {
                    break;
                }
                if tokenizer.consume_token().is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
});
