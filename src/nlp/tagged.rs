//! Readers for tagger output
//!
//! The scoring core never tokenizes text itself. These readers turn the two
//! common serializations of Japanese morphological analysis into
//! [`Sentence`]s:
//!
//! - KyTea style: `surface/tag/reading` chunks separated by single spaces,
//!   one sentence per line. The reading is optional.
//! - MeCab style: one `surface\tfeature` line per token, sentences
//!   terminated by `EOS`.

use std::io::BufRead;

use crate::errors::{ExtractionError, Result};
use crate::types::{Sentence, Token};

/// Parse one line of KyTea-style `surface/tag/reading` output.
///
/// The surface always takes at least one character, so `/` and a single
/// space are valid surfaces. A chunk without a tag becomes a token with an
/// empty tag, which the category mapper treats as OTHER.
pub fn parse_kytea_line(line: &str) -> Sentence {
    let mut rest = line.trim_end_matches(|c| c == '\r' || c == '\n');
    let mut tokens = Vec::new();

    while !rest.is_empty() {
        let (token, remaining) = split_chunk(rest);
        if let Some(token) = token {
            tokens.push(token);
        }
        rest = remaining;
    }

    tokens
}

/// Split the leading chunk off `input`, returning it and the remainder.
fn split_chunk(input: &str) -> (Option<Token>, &str) {
    let is_delim = |c: char| c == '/' || c == ' ';

    let first = input.chars().next().map_or(0, char::len_utf8);
    let surface_end = input[first..]
        .find(is_delim)
        .map_or(input.len(), |i| first + i);
    let surface = &input[..surface_end];
    let mut rest = &input[surface_end..];
    let mut tag = "";

    if let Some(after_surface) = rest.strip_prefix('/') {
        let tag_end = after_surface.find(is_delim).unwrap_or(after_surface.len());
        tag = &after_surface[..tag_end];
        rest = &after_surface[tag_end..];

        // reading is not needed downstream
        if let Some(after_tag) = rest.strip_prefix('/') {
            let reading_end = after_tag.find(' ').unwrap_or(after_tag.len());
            rest = &after_tag[reading_end..];
        }
    }

    let rest = rest.strip_prefix(' ').unwrap_or(rest);

    // Stray separator whitespace, not a token.
    if tag.is_empty() && surface.trim().is_empty() {
        return (None, rest);
    }

    (Some(Token::new(surface, tag)), rest)
}

/// Read KyTea-style output, one sentence per non-blank line.
pub fn read_kytea<R: BufRead>(reader: R) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        sentences.push(parse_kytea_line(&line));
    }
    Ok(sentences)
}

/// Read MeCab-style output.
///
/// Each token line is `surface\tfeature`; the full feature string is kept as
/// the tag. `EOS` closes a sentence, and a final sentence without `EOS` is
/// still returned.
pub fn read_mecab<R: BufRead>(reader: R) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if line == "EOS" {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let (surface, feature) =
            line.split_once('\t')
                .ok_or_else(|| ExtractionError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                })?;
        current.push(Token::new(surface, feature));
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_three_field_chunks() {
        let tokens = parse_kytea_line("仮想/名詞/かそう 関数/名詞/かんすう ");
        assert_eq!(
            tokens,
            vec![Token::new("仮想", "名詞"), Token::new("関数", "名詞")]
        );
    }

    #[test]
    fn test_last_chunk_without_trailing_space() {
        let tokens = parse_kytea_line("非/接頭辞/ひ 同期/名詞/どうき 通信/名詞/つうしん");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2], Token::new("通信", "名詞"));
    }

    #[test]
    fn test_two_field_chunks() {
        let tokens = parse_kytea_line("再/接頭辞 初期/名詞 化/接尾辞");
        assert_eq!(
            tokens,
            vec![
                Token::new("再", "接頭辞"),
                Token::new("初期", "名詞"),
                Token::new("化", "接尾辞"),
            ]
        );
    }

    #[test]
    fn test_slash_and_space_surfaces() {
        let tokens = parse_kytea_line("a/名詞/a //補助記号//  /空白/sp b/名詞/b");
        let surfaces: Vec<_> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["a", "/", " ", "b"]);
        assert_eq!(tokens[1].tag, "補助記号");
        assert_eq!(tokens[2].tag, "空白");
    }

    #[test]
    fn test_untagged_chunk_kept_with_empty_tag() {
        let tokens = parse_kytea_line("foo 関数/名詞/かんすう");
        assert_eq!(tokens[0], Token::new("foo", ""));
        assert_eq!(tokens[1], Token::new("関数", "名詞"));
    }

    #[test]
    fn test_empty_line() {
        assert!(parse_kytea_line("").is_empty());
        assert!(parse_kytea_line("\r\n").is_empty());
    }

    #[test]
    fn test_read_kytea_skips_blank_lines() {
        let input = "仮想/名詞/かそう 関数/名詞/かんすう\n\n未/接頭辞/み 定義/名詞/ていぎ 型/接尾辞/かた\n";
        let sentences = read_kytea(Cursor::new(input)).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].len(), 3);
    }

    #[test]
    fn test_read_mecab() {
        let input = "仮想\t名詞,普通名詞,一般,*\n関数\t名詞,普通名詞,一般,*\nEOS\n非\t接頭辞,*,*,*\n同期\t名詞,普通名詞,サ変可能,*\nEOS\n";
        let sentences = read_mecab(Cursor::new(input)).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0][0].surface, "仮想");
        assert_eq!(sentences[0][0].tag, "名詞,普通名詞,一般,*");
        assert_eq!(sentences[1][0].surface, "非");
    }

    #[test]
    fn test_read_mecab_trailing_sentence_without_eos() {
        let input = "組織\t名詞\n培養\t名詞\n";
        let sentences = read_mecab(Cursor::new(input)).unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].len(), 2);
    }

    #[test]
    fn test_read_mecab_malformed_line() {
        let input = "組織\t名詞\nbroken line\nEOS\n";
        let err = read_mecab(Cursor::new(input)).unwrap_err();
        match err {
            ExtractionError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "broken line");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
