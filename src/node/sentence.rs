use crate::context::ParseContext;
use crate::error::{Result, TreeError};
use crate::raw::{is_whitespace, RawNode};
use crate::tree::{check_indent, NodeId, ParseTree};

use super::{NodeKind, Parsable};

/// One directive or comment line: words with the whitespace tokens between
/// them kept in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    context: ParseContext,
    tokens: Vec<String>,
}

impl Sentence {
    /// Parses a stand-alone sentence outside of any tree
    pub fn from_raw(
        context: ParseContext,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<Self> {
        let tokens = match raw.as_list() {
            Some(items) if !items.is_empty() => items
                .iter()
                .map(|item| item.as_token().map(str::to_string))
                .collect::<Option<Vec<_>>>(),
            _ => None,
        };
        let Some(tokens) = tokens else {
            return Err(TreeError::StructuralMismatch(
                "Sentence parsing expects a non-empty list of tokens".to_string(),
            ));
        };

        let tokens = if synthesize_spacing {
            space_tokens(tokens)
        } else {
            tokens
        };
        Ok(Self { context, tokens })
    }

    pub(crate) fn context_mut(&mut self) -> &mut ParseContext {
        &mut self.context
    }

    /// All tokens, whitespace included
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Non-whitespace tokens with surrounding quotes stripped
    pub fn words(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|token| !is_whitespace(token))
            .map(|token| token.trim_matches(|c: char| c == '"' || c == '\''))
            .collect()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words().get(index).copied()
    }

    /// Indentation of the line this sentence starts on: whatever follows the
    /// last newline of a leading whitespace token.
    pub fn indent(&self) -> &str {
        match self.tokens.first() {
            Some(first) if is_whitespace(first) => match first.rfind('\n') {
                Some(index) => &first[index + 1..],
                None => first.as_str(),
            },
            _ => "",
        }
    }

    /// Puts the sentence on a new line indented by `indent`. A sentence that
    /// already starts with whitespace is left alone.
    pub fn set_indent(&mut self, indent: &str) -> Result<()> {
        check_indent(indent)?;
        if self.tokens.first().is_some_and(|first| is_whitespace(first)) {
            return Ok(());
        }
        self.tokens.insert(0, format!("\n{indent}"));
        Ok(())
    }
}

impl Parsable for Sentence {
    const KIND: NodeKind = NodeKind::Sentence;

    fn matches(raw: &RawNode) -> bool {
        raw.as_list()
            .is_some_and(|items| !items.is_empty() && items.iter().all(RawNode::is_token))
    }

    fn parse(
        _tree: &mut ParseTree,
        _owner: NodeId,
        context: ParseContext,
        raw: &RawNode,
        synthesize_spacing: bool,
    ) -> Result<Self> {
        Sentence::from_raw(context, raw, synthesize_spacing)
    }

    fn context(&self) -> &ParseContext {
        &self.context
    }

    fn dump(&self, _tree: &ParseTree, include_whitespace: bool) -> RawNode {
        if include_whitespace {
            RawNode::list(self.tokens.iter().map(|token| RawNode::token(token.as_str())))
        } else {
            RawNode::list(self.words().into_iter().map(RawNode::from))
        }
    }

    fn get_indent(&self, _tree: &ParseTree) -> String {
        self.indent().to_string()
    }
}

/// Inserts a single space between adjacent words that have no whitespace
/// token between them. Already spaced input comes back unchanged.
pub fn space_tokens(tokens: Vec<String>) -> Vec<String> {
    let mut spaced: Vec<String> = Vec::with_capacity(tokens.len() * 2);
    let mut inserted = 0;
    for token in tokens {
        let needs_space = spaced
            .last()
            .is_some_and(|prev| !is_whitespace(prev) && !is_whitespace(&token));
        if needs_space {
            spaced.push(" ".to_string());
            inserted += 1;
        }
        spaced.push(token);
    }
    log::trace!("synthesized {inserted} spacing token(s)");
    spaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw;

    fn sentence(raw: RawNode) -> Sentence {
        Sentence::from_raw(ParseContext::new(), &raw, false).unwrap()
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_matches() {
        assert!(Sentence::matches(&raw!(["listen", " ", "80"])));
        assert!(Sentence::matches(&raw!([" "])));
        assert!(!Sentence::matches(&raw!([])));
        assert!(!Sentence::matches(&raw!("listen")));
        assert!(!Sentence::matches(&raw!(["listen", ["80"]])));
    }

    #[test]
    fn test_parse_rejects_non_tokens() {
        let context = ParseContext::new();
        assert!(matches!(
            Sentence::from_raw(context.clone(), &raw!(["foo", ["42"]]), false),
            Err(TreeError::StructuralMismatch(_))
        ));
        assert!(Sentence::from_raw(context.clone(), &raw!([]), false).is_err());
        assert!(Sentence::from_raw(context, &raw!("foo"), false).is_err());
    }

    #[test]
    fn test_words() {
        let s = sentence(raw!(["\n    ", "server_name", " ", "\"example.com\"", " ", "'www'", ";"]));
        assert_eq!(s.words(), vec!["server_name", "example.com", "www", ";"]);
        assert_eq!(s.word(1), Some("example.com"));
        assert_eq!(s.word(4), None);
    }

    #[test]
    fn test_indent() {
        assert_eq!(sentence(raw!(["\n\n    ", "listen"])).indent(), "    ");
        assert_eq!(sentence(raw!(["  ", "listen"])).indent(), "  ");
        assert_eq!(sentence(raw!(["\n", "listen"])).indent(), "");
        assert_eq!(sentence(raw!(["listen", " ", "80"])).indent(), "");
    }

    #[test]
    fn test_set_indent() {
        let mut s = sentence(raw!(["listen", " ", "80", ";"]));
        s.set_indent("  ").unwrap();
        assert_eq!(s.tokens(), strings(&["\n  ", "listen", " ", "80", ";"]).as_slice());
        assert_eq!(s.indent(), "  ");

        // already positioned
        s.set_indent("        ").unwrap();
        assert_eq!(s.indent(), "  ");

        let mut s = sentence(raw!(["listen"]));
        assert!(matches!(
            s.set_indent("\n"),
            Err(TreeError::InvalidIndent(_))
        ));
        assert_eq!(s.tokens(), strings(&["listen"]).as_slice());
    }

    #[test]
    fn test_space_tokens() {
        assert_eq!(space_tokens(strings(&["foo", "bar"])), strings(&["foo", " ", "bar"]));
        assert_eq!(
            space_tokens(strings(&["foo", " ", "bar"])),
            strings(&["foo", " ", "bar"])
        );
        assert_eq!(
            space_tokens(strings(&["\n", "a", "b", "c", "  "])),
            strings(&["\n", "a", " ", "b", " ", "c", "  "])
        );
        assert_eq!(space_tokens(vec![]), Vec::<String>::new());

        let once = space_tokens(strings(&["return", "301", "https://$host"]));
        assert_eq!(space_tokens(once.clone()), once);
    }

    #[test]
    fn test_parse_with_spacing() {
        let s = Sentence::from_raw(ParseContext::new(), &raw!(["foo", "bar"]), true).unwrap();
        assert_eq!(s.tokens(), strings(&["foo", " ", "bar"]).as_slice());
        assert_eq!(s.words(), vec!["foo", "bar"]);
    }
}
