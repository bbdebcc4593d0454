//! HTML5 tokenization
//!
//! Drives html5ever's tokenizer and collects its output into our token
//! model. html5ever leaves raw-text state switching to its sink (the tree
//! builder normally does it), so the sink here switches states for
//! `<script>`, `<style>`, `<title>` and friends; their content then arrives
//! as character data instead of being retokenized as markup.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as H5Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::token::{Attr, Token, is_rawtext};

/// Tokenize an HTML fragment.
///
/// Never fails: malformed markup is recovered per the HTML5 tokenization
/// rules and surfaces as interleaved [`Token::ParseError`] values. Input is
/// already-decoded UTF-8; a leading BOM is discarded.
pub fn tokenize(html: &str) -> Vec<Token> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from(html));

    let tokenizer = Tokenizer::new(TokenCollector::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let tokens = tokenizer.sink.tokens.into_inner();
    tracing::debug!("tokenized {} bytes into {} tokens", html.len(), tokens.len());
    tokens
}

/// Sink that converts html5ever tokens into [`Token`] values.
#[derive(Default)]
struct TokenCollector {
    tokens: RefCell<Vec<Token>>,
}

impl TokenSink for TokenCollector {
    type Handle = ();

    fn process_token(&self, token: H5Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            H5Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let attrs = tag
                            .attrs
                            .into_iter()
                            .map(|attr| Attr {
                                name: attr.name.local.to_string(),
                                value: attr.value.to_string(),
                            })
                            .collect();
                        self.tokens.borrow_mut().push(Token::StartTag {
                            attrs,
                            self_closing: tag.self_closing,
                            name: name.clone(),
                        });
                        if name == "plaintext" {
                            return TokenSinkResult::Plaintext;
                        }
                        if let Some(kind) = raw_kind(&name) {
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                    TagKind::EndTag => {
                        self.tokens.borrow_mut().push(Token::EndTag { name });
                    }
                }
            }
            H5Token::CharacterTokens(text) => {
                self.tokens
                    .borrow_mut()
                    .push(Token::Characters(text.to_string()));
            }
            H5Token::CommentToken(text) => {
                self.tokens
                    .borrow_mut()
                    .push(Token::Comment(text.to_string()));
            }
            H5Token::DoctypeToken(doctype) => {
                self.tokens.borrow_mut().push(Token::Doctype {
                    name: doctype.name.as_ref().map(|t| t.to_string()),
                    public_id: doctype.public_id.as_ref().map(|t| t.to_string()),
                    system_id: doctype.system_id.as_ref().map(|t| t.to_string()),
                });
            }
            H5Token::ParseError(info) => {
                self.tokens.borrow_mut().push(Token::ParseError(info));
            }
            // Null characters never make it into output.
            H5Token::NullCharacterToken | H5Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

/// Raw-text tokenizer state entered by a start tag, if any.
fn raw_kind(name: &str) -> Option<RawKind> {
    if !is_rawtext(name) {
        return None;
    }
    match name {
        "script" => Some(RawKind::ScriptData),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => Some(RawKind::Rawtext),
    }
}
